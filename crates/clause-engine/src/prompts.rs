//! Prompt templates sent to the generation service

use shared_types::char_prefix;

/// Characters of input sent with an explain / simplify request
pub const EXPLAIN_CHARS: usize = 2000;

/// Characters of the document sent as chat context
pub const CHAT_EXCERPT_CHARS: usize = 3000;

pub fn risk_prompt(clause: &str) -> String {
    format!("Evaluate risk level (low/medium/high) of this legal clause:\n\n{}", clause)
}

/// Plain-English explanation; the input is cut to [`EXPLAIN_CHARS`]
pub fn explain_prompt(text: &str) -> String {
    format!(
        "Explain this legal text in simple English:\n\n{}",
        char_prefix(text, EXPLAIN_CHARS)
    )
}

pub fn suggest_prompt(clause: &str) -> String {
    format!("Suggest fair/legal improvements for this clause:\n\n{}", clause)
}

pub fn chat_prompt(excerpt: &str, message: &str) -> String {
    format!("Contract Excerpt:\n{}\n\nUser: {}\nAI:", excerpt, message)
}
