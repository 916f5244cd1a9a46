use thiserror::Error;

/// Failure talking to the remote text-generation service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Request to generation service failed: {0}")]
    Transport(String),

    #[error("Generation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Generation service returned no text")]
    EmptyResponse,

    #[error("Unexpected response from generation service: {0}")]
    Malformed(String),
}

/// Errors surfaced by session actions
#[derive(Debug, Error)]
pub enum EngineError {
    /// Blank user input; nothing was sent to the remote service
    #[error("Please enter {0} first")]
    EmptyInput(&'static str),

    #[error("No document has been uploaded")]
    NoDocument,

    #[error("Clause {0} not found in the last analysis")]
    ClauseNotFound(usize),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
