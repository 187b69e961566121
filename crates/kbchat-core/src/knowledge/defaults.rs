//! Starter knowledge base used whenever the persisted file is missing or unusable.

use super::Entry;

const DEFAULT_KB: [(&str, &str, &[&str]); 8] = [
    (
        "What is Python used for?",
        "Python is a versatile programming language used for web development, data science, scripting, automation, and more. Popular libraries: requests, Flask/FastAPI, pandas, numpy, scikit-learn, PyTorch.",
        &["python", "language", "general"],
    ),
    (
        "How do I start learning machine learning?",
        "Start with Python basics, statistics, and linear algebra. Learn pandas/numpy for data handling, then study supervised learning (linear/logistic regression, decision trees). Use scikit-learn for experiments and follow with deep learning frameworks like PyTorch or TensorFlow.",
        &["ml", "machine learning", "learning path", "data science"],
    ),
    (
        "What is version control / Git?",
        "Git is a distributed version control system for tracking changes in source code. Typical workflow: clone, create branches, commit, push, open pull requests, and merge. Platforms: GitHub, GitLab, Bitbucket.",
        &["git", "version control", "vcs"],
    ),
    (
        "What is Docker and why use it?",
        "Docker packages applications into lightweight containers for consistent environments across development and production. Use it to isolate dependencies and simplify deployment.",
        &["docker", "containers", "devops"],
    ),
    (
        "How do I evaluate a model?",
        "Choose metrics suitable for the problem: accuracy/precision/recall/F1 for classification, RMSE/MAE for regression. Use cross-validation to estimate generalization and inspect learning curves and confusion matrices.",
        &["model evaluation", "metrics", "ml"],
    ),
    (
        "When should I use SQL vs NoSQL?",
        "Use SQL (relational DBs) for structured data with strong consistency and ACID requirements. Use NoSQL for flexible schemas, high throughput, or hierarchical/document data (e.g., MongoDB). Consider use-case and scaling needs.",
        &["sql", "database", "nosql"],
    ),
    (
        "What are REST APIs?",
        "REST (Representational State Transfer) is an architectural style for networked applications using HTTP verbs (GET/POST/PUT/DELETE). Design resources with clear URLs, use status codes, and consider authentication and pagination.",
        &["rest", "api", "web"],
    ),
    (
        "How to test my code?",
        "Write unit tests for functions, integration tests for components, and use test automation. In Python, use pytest or unittest. Run tests in CI and aim for clear, deterministic tests.",
        &["testing", "ci", "pytest"],
    ),
];

/// Returns a fresh copy of the built-in entries, in their fixed order.
pub fn default_entries() -> Vec<Entry> {
    DEFAULT_KB
        .iter()
        .map(|(question, answer, tags)| {
            Entry::new(*question, *answer).with_tags(tags.iter().copied())
        })
        .collect()
}
