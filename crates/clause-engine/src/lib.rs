//! Clause analysis pipeline for uploaded legal documents
//!
//! ```text
//! raw text ──► finder ──► classifier (one remote call per clause) ──► aggregate ──► render
//! ```
//!
//! The conversational assistant in [`chat`] runs beside the pipeline and only
//! shares the document's raw text. [`session::SessionState`] ties everything
//! together with one method per user action.

pub mod aggregate;
pub mod chat;
pub mod classifier;
pub mod error;
pub mod finder;
pub mod generator;
pub mod glossary;
pub mod keywords;
pub mod prompts;
pub mod render;
pub mod session;

pub use aggregate::{summarize, Summary, TOP_CLAUSES};
pub use chat::{ChatState, CHAT_APOLOGY};
pub use classifier::{parse_risk_label, ClassificationFailure, ClassifiedClauses, RiskClassifier};
pub use error::{EngineError, GenerationError};
pub use finder::find_clauses;
pub use generator::TextGenerator;
#[cfg(any(test, feature = "testing"))]
pub use generator::ScriptedGenerator;
pub use glossary::GLOSSARY;
pub use keywords::RISK_KEYWORDS;
pub use render::{render, CardButton, ChartSlice, ClauseAction, ClauseCard, Presentation};
pub use session::{RiskAnalysis, RiskInsights, SessionState};
