//! Data model shared by the extraction, analysis and server crates

pub mod types;

pub use types::{
    char_prefix, ChatTurn, Clause, Document, GlossaryEntry, MediaType, RiskLabel, RiskTally,
    Speaker, PREVIEW_CHARS,
};
