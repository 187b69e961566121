//! Transport for the kbchat assistant: HTTP gateway (default) or stdin console. Config-driven via CoreConfig.

use axum::{extract::State, http::Method, routing::{get, post}, Json, Router};
use kbchat_core::{Assistant, CoreConfig, KnowledgeStore};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pre-flight check: knowledge base file decodes (or defaults apply) and the port is free.
fn run_verify(config: &CoreConfig) -> Result<(), String> {
    let kb_path = config.kb_path();
    print!("Checking knowledge base {}... ", kb_path.display());
    if kb_path.exists() {
        match KnowledgeStore::try_open(&kb_path) {
            Ok(store) => println!("OK ({} entries)", store.len()),
            Err(e) => println!("UNUSABLE ({}); defaults would be used", e),
        }
    } else {
        println!("absent; defaults would be used");
    }

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\nAll checks passed. Ready to start {}.", config.app_name);
    Ok(())
}

/// Reads one message per line from `input` and writes each reply to `output`, until EOF.
fn run_console<R: BufRead, W: Write>(assistant: &Assistant, input: R, mut output: W) -> io::Result<()> {
    for line in input.lines() {
        let reply = assistant.handle(&line?);
        writeln!(output, "{}\n", reply)?;
        output.flush()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[kbchat-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Arc::new(CoreConfig::load()?);

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify(&config) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    let assistant = Arc::new(Assistant::from_config(&config));
    tracing::info!(
        kb_path = %config.kb_path,
        entries = assistant.entry_count(),
        "Knowledge base ready"
    );

    if args.iter().any(|a| a == "--console") {
        let console = Arc::clone(&assistant);
        tokio::task::spawn_blocking(move || {
            run_console(&console, io::stdin().lock(), io::stdout().lock())
        })
        .await??;
        return Ok(());
    }

    let app = build_app(AppState {
        config: Arc::clone(&config),
        assistant,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn is_local_origin(origin: &str) -> bool {
    let host = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .unwrap_or(origin);
    let host = host.rsplit_once(':').map(|(h, _)| h).unwrap_or(host);
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

fn build_app(state: AppState) -> Router {
    // CORS: only browser UIs served from this machine may call the chat endpoint.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            origin.to_str().map(is_local_origin).unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/chat", post(chat))
        .with_state(state)
        .layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) assistant: Arc<Assistant>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity and knowledge-base size.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let assistant = Arc::clone(&state.assistant);
    let entries = tokio::task::spawn_blocking(move || assistant.entry_count())
        .await
        .unwrap_or(0);
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "kb_path": state.config.kb_path,
        "entries": entries,
    }))
}

/// Chat message from a UI client.
#[derive(serde::Deserialize)]
struct ChatRequest {
    message: String,
}

/// POST /api/v1/chat – runs one message through the assistant.
///
/// Runs on the blocking pool: `/save` and `/load` touch the filesystem and the store lock is synchronous.
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<serde_json::Value> {
    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(%request_id, chars = req.message.len(), "Chat request received");

    let assistant = Arc::clone(&state.assistant);
    match tokio::task::spawn_blocking(move || assistant.handle(&req.message)).await {
        Ok(response) => Json(serde_json::json!({
            "status": "ok",
            "request_id": request_id,
            "response": response,
        })),
        Err(e) => {
            tracing::error!(%request_id, "Chat error: {}", e);
            Json(serde_json::json!({
                "status": "error",
                "request_id": request_id,
                "error": e.to_string(),
            }))
        }
    }
}
