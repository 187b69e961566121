//! Turns a match result into the reply shown to the user.

use crate::matcher::BestAnswer;

/// Total display width of a wrapped answer line, indent included.
pub const DISPLAY_WIDTH: usize = 80;
/// Left indent applied to every answer line.
pub const ANSWER_INDENT: &str = "  ";
/// Scores below this are annotated with the matched question.
pub const CONFIDENT_SCORE: f64 = 0.6;

pub const NO_ANSWER: &str = "Bot: I don't have a good answer for that. You can add it with /add.";

/// Wraps `text` to [`DISPLAY_WIDTH`] columns, each line prefixed with `indent`.
pub fn wrap_indented(text: &str, indent: &str) -> String {
    let options = textwrap::Options::new(DISPLAY_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::wrap(text, options).join("\n")
}

pub fn render_answer(best: &BestAnswer<'_>) -> String {
    let Some(entry) = best.entry else {
        return NO_ANSWER.to_string();
    };
    let answer = wrap_indented(&entry.answer, ANSWER_INDENT);
    let meta = if best.score < CONFIDENT_SCORE {
        format!(
            "\n\n(matched: \"{}\" score={:.2})",
            entry.question, best.score
        )
    } else {
        String::new()
    };
    format!("Bot:\n{}{}", answer, meta)
}
