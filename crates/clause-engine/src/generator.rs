//! Seam to the remote text-generation service

use async_trait::async_trait;

use crate::error::GenerationError;

/// A service that turns a prompt into free-form text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedGenerator;

#[cfg(any(test, feature = "testing"))]
mod scripted {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::TextGenerator;
    use crate::error::GenerationError;

    type Rule = Box<dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync>;

    /// In-memory generator for tests: answers with a rule and records every prompt
    pub struct ScriptedGenerator {
        rule: Rule,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new<F>(rule: F) -> Self
        where
            F: Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
        {
            Self {
                rule: Box::new(rule),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Always reply with `reply`
        pub fn replying(reply: &str) -> Self {
            let reply = reply.to_string();
            Self::new(move |_| Ok(reply.clone()))
        }

        /// Always fail with a transport error
        pub fn failing() -> Self {
            Self::new(|_| Err(GenerationError::Transport("connection refused".into())))
        }

        /// Prompts received so far, in call order
        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }

        pub fn call_count(&self) -> usize {
            self.prompts().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            (self.rule)(prompt)
        }
    }
}
