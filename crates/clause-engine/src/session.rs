//! Per-session state and the user actions that transform it
//!
//! A [`SessionState`] is owned by whoever hosts the UI and handed to each
//! action explicitly. Actions run to completion; nothing here touches global
//! state.

use serde::Serialize;
use shared_types::{ChatTurn, Clause, Document, GlossaryEntry, RiskTally};
use tracing::info;

use crate::aggregate::Summary;
use crate::chat::ChatState;
use crate::classifier::{ClassificationFailure, ClassifiedClauses, RiskClassifier};
use crate::error::EngineError;
use crate::finder::find_clauses;
use crate::generator::TextGenerator;
use crate::prompts::{explain_prompt, suggest_prompt};
use crate::render::{render, ChartSlice, ClauseAction, ClauseCard, Presentation};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    pub document: Option<Document>,
    pub chat: ChatState,
    /// Clauses from the most recent analysis, backing the card actions
    pub last_analysis: Vec<Clause>,
}

/// Inline highlighting view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAnalysis {
    pub highlighted_html: String,
    pub cards: Vec<ClauseCard>,
    pub failures: Vec<ClassificationFailure>,
}

/// Visual insights view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskInsights {
    pub executive_summary: Vec<String>,
    pub top: Vec<Clause>,
    pub cards: Vec<ClauseCard>,
    pub tally: RiskTally,
    pub chart: Vec<ChartSlice>,
    pub glossary: Vec<GlossaryEntry>,
    pub failures: Vec<ClassificationFailure>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current document. Results of the previous analysis are
    /// dropped; chat history is kept.
    pub fn upload(&mut self, document: Document) {
        info!(
            "Document uploaded: {} ({} chars)",
            document.name,
            document.raw_text.chars().count()
        );
        self.document = Some(document);
        self.last_analysis.clear();
    }

    fn document(&self) -> Result<&Document, EngineError> {
        self.document.as_ref().ok_or(EngineError::NoDocument)
    }

    pub fn preview(&self) -> Result<String, EngineError> {
        Ok(self.document()?.preview())
    }

    /// Plain-English summary of the start of the document
    pub async fn simplify_document(
        &self,
        generator: &dyn TextGenerator,
    ) -> Result<String, EngineError> {
        let document = self.document()?;
        info!("Simplifying document {}", document.name);
        Ok(generator.generate(&explain_prompt(&document.raw_text)).await?)
    }

    /// Sidebar explainer for a pasted clause. Blank input never reaches the
    /// service.
    pub async fn explain_clause(
        &self,
        input: &str,
        generator: &dyn TextGenerator,
    ) -> Result<String, EngineError> {
        if input.trim().is_empty() {
            return Err(EngineError::EmptyInput("a clause"));
        }
        Ok(generator.generate(&explain_prompt(input)).await?)
    }

    async fn classify_document<K: AsRef<str>>(
        &mut self,
        generator: &dyn TextGenerator,
        keywords: &[K],
    ) -> Result<ClassifiedClauses, EngineError> {
        let raw_text = &self.document()?.raw_text;
        let found = find_clauses(raw_text, keywords);
        info!("Analyzing {} risk clauses", found.len());

        let classified = RiskClassifier::new(generator).classify_all(found).await;
        self.last_analysis = classified.clauses.clone();
        Ok(classified)
    }

    /// Classify every keyword clause and highlight it inline
    pub async fn analyze_risk<K: AsRef<str>>(
        &mut self,
        generator: &dyn TextGenerator,
        keywords: &[K],
    ) -> Result<RiskAnalysis, EngineError> {
        let ClassifiedClauses { clauses, failures } =
            self.classify_document(generator, keywords).await?;
        let Presentation {
            highlighted_html,
            cards,
            ..
        } = render(&self.document()?.raw_text, &clauses);

        Ok(RiskAnalysis {
            highlighted_html,
            cards,
            failures,
        })
    }

    /// Classify every keyword clause and build the summary, chart and glossary
    pub async fn risk_insights<K: AsRef<str>>(
        &mut self,
        generator: &dyn TextGenerator,
        keywords: &[K],
    ) -> Result<RiskInsights, EngineError> {
        let ClassifiedClauses { clauses, failures } =
            self.classify_document(generator, keywords).await?;
        let Presentation {
            cards,
            summary: Summary { top, tally },
            executive_summary,
            chart,
            glossary,
            ..
        } = render(&self.document()?.raw_text, &clauses);

        Ok(RiskInsights {
            executive_summary,
            top,
            cards,
            tally,
            chart,
            glossary,
            failures,
        })
    }

    /// Run a card button against a clause from the last analysis
    pub async fn clause_action(
        &self,
        index: usize,
        action: ClauseAction,
        generator: &dyn TextGenerator,
    ) -> Result<String, EngineError> {
        let clause = self
            .last_analysis
            .get(index)
            .ok_or(EngineError::ClauseNotFound(index))?;

        let prompt = match action {
            ClauseAction::Explain => explain_prompt(&clause.text),
            ClauseAction::SuggestFairTerms => suggest_prompt(&clause.text),
        };
        info!(index, ?action, "Running clause action");
        Ok(generator.generate(&prompt).await?)
    }

    pub fn toggle_chat(&mut self) -> bool {
        self.chat.toggle()
    }

    pub async fn send_chat(
        &mut self,
        message: &str,
        generator: &dyn TextGenerator,
    ) -> Result<ChatTurn, EngineError> {
        if message.trim().is_empty() {
            return Err(EngineError::EmptyInput("a message"));
        }
        let reply = self
            .chat
            .send(self.document.as_ref(), message, generator)
            .await;
        Ok(reply.clone())
    }
}
