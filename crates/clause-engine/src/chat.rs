//! Contract Q&A assistant
//!
//! The chat window is either collapsed or expanded, and a single toggle
//! switches between the two. Each question is answered from the first
//! [`CHAT_EXCERPT_CHARS`] characters of the current document. History is
//! append-only and uncapped for the life of the session.

use serde::Serialize;
use shared_types::{ChatTurn, Document};
use tracing::{debug, warn};

use crate::generator::TextGenerator;
use crate::prompts::{chat_prompt, CHAT_EXCERPT_CHARS};

/// Assistant reply used when the generation service fails
pub const CHAT_APOLOGY: &str = "⚠️ Sorry, I couldn't fetch an answer right now.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatState {
    pub expanded: bool,
    pub transcript: Vec<ChatTurn>,
}

impl ChatState {
    /// Flip between collapsed and expanded; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Record the user's message, ask the service, and record the reply.
    /// A failed call is answered with [`CHAT_APOLOGY`].
    pub async fn send(
        &mut self,
        document: Option<&Document>,
        message: &str,
        generator: &dyn TextGenerator,
    ) -> &ChatTurn {
        self.transcript.push(ChatTurn::user(message));

        let excerpt = document
            .map(|d| d.excerpt(CHAT_EXCERPT_CHARS))
            .unwrap_or_default();
        let prompt = chat_prompt(excerpt, message);
        debug!(
            excerpt_chars = excerpt.chars().count(),
            turns = self.transcript.len(),
            "sending chat prompt"
        );

        let answer = match generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "chat generation failed");
                CHAT_APOLOGY.to_string()
            }
        };

        self.transcript.push(ChatTurn::assistant(answer));
        &self.transcript[self.transcript.len() - 1]
    }
}
