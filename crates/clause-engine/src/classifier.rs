//! Remote risk classification
//!
//! Each clause is sent to the generation service with a fixed prompt and the
//! free-text reply is reduced to a label. The parsing is a plain substring
//! test on the lower-cased reply: `"high"` wins over `"medium"`, and anything
//! else is treated as low risk.

use serde::Serialize;
use shared_types::{Clause, RiskLabel};
use tracing::{debug, info, warn};

use crate::error::GenerationError;
use crate::generator::TextGenerator;
use crate::prompts::risk_prompt;

/// Reduce a free-text model reply to a risk label
pub fn parse_risk_label(reply: &str) -> RiskLabel {
    let reply = reply.to_lowercase();
    let reply = reply.trim();
    if reply.contains("high") {
        RiskLabel::High
    } else if reply.contains("medium") {
        RiskLabel::Medium
    } else {
        // Replies naming neither level count as low risk
        RiskLabel::Low
    }
}

/// A clause the service could not classify; the clause stays `Unknown`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationFailure {
    pub index: usize,
    pub clause: String,
    pub error: String,
}

/// Result of classifying a whole clause list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedClauses {
    pub clauses: Vec<Clause>,
    pub failures: Vec<ClassificationFailure>,
}

pub struct RiskClassifier<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self { generator }
    }

    /// Classify one clause. Nothing is cached, so the same text may come back
    /// with a different label on a later call.
    pub async fn classify(&self, clause_text: &str) -> Result<RiskLabel, GenerationError> {
        let reply = self.generator.generate(&risk_prompt(clause_text)).await?;
        let label = parse_risk_label(&reply);
        debug!(%label, reply_len = reply.len(), "classified clause");
        Ok(label)
    }

    /// Classify clauses one after another. A failed call is recorded and the
    /// remaining clauses still run.
    pub async fn classify_all(&self, clauses: Vec<Clause>) -> ClassifiedClauses {
        let mut classified = Vec::with_capacity(clauses.len());
        let mut failures = Vec::new();

        for (index, mut clause) in clauses.into_iter().enumerate() {
            match self.classify(&clause.text).await {
                Ok(label) => clause.risk_label = label,
                Err(e) => {
                    warn!(index, error = %e, "risk classification failed");
                    clause.risk_label = RiskLabel::Unknown;
                    failures.push(ClassificationFailure {
                        index,
                        clause: clause.text.clone(),
                        error: e.to_string(),
                    });
                }
            }
            classified.push(clause);
        }

        info!(
            clauses = classified.len(),
            failures = failures.len(),
            "risk classification pass complete"
        );

        ClassifiedClauses {
            clauses: classified,
            failures,
        }
    }
}
