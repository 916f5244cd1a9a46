//! Risk keyword list and matching helpers

/// Keywords that flag a sentence as a risk clause, in match order
pub const RISK_KEYWORDS: &[&str] = &[
    "termination",
    "arbitration",
    "liability",
    "penalty",
    "indemnity",
    "confidentiality",
    "governing law",
    "force majeure",
    "breach",
    "warranty",
    "notice",
    "jurisdiction",
    "assignment",
    "non-compete",
];

/// Case-insensitive substring test
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}
