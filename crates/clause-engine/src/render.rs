//! Presentation model for analyzed clauses
//!
//! Everything here is a pure projection of the classified clause list. The
//! document highlight is a literal substring replacement over the whole
//! text, so a sentence that appears verbatim more than once is highlighted
//! everywhere it occurs.

use serde::{Deserialize, Serialize};
use shared_types::{char_prefix, Clause, GlossaryEntry, RiskLabel, RiskTally};

use crate::aggregate::{summarize, Summary};
use crate::glossary::GLOSSARY;

const CARD_HEADING_CHARS: usize = 50;
const SUMMARY_LINE_CHARS: usize = 120;

/// Background used when highlighting a clause
pub fn highlight_color(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::High => "#ffcccc",
        RiskLabel::Medium => "#fff2cc",
        RiskLabel::Low | RiskLabel::Unknown => "#ccffcc",
    }
}

/// Pie slice color
pub fn chart_color(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::High => "red",
        RiskLabel::Medium => "orange",
        RiskLabel::Low | RiskLabel::Unknown => "green",
    }
}

/// On-demand actions offered on every clause card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseAction {
    Explain,
    SuggestFairTerms,
}

impl ClauseAction {
    pub const ALL: [ClauseAction; 2] = [ClauseAction::Explain, ClauseAction::SuggestFairTerms];

    pub fn button_label(&self) -> &'static str {
        match self {
            ClauseAction::Explain => "Explain this clause",
            ClauseAction::SuggestFairTerms => "Suggest Fair Terms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardButton {
    pub action: ClauseAction,
    pub label: &'static str,
}

impl From<ClauseAction> for CardButton {
    fn from(action: ClauseAction) -> Self {
        Self {
            action,
            label: action.button_label(),
        }
    }
}

/// One expandable card per clause. The heading is the summary line shown
/// while the card is collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseCard {
    pub index: usize,
    pub heading: String,
    pub body: String,
    pub risk_label: RiskLabel,
    pub background: &'static str,
    /// Cards start collapsed
    pub expanded: bool,
    pub actions: [CardButton; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: RiskLabel,
    pub name: &'static str,
    pub count: usize,
    pub percent: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub highlighted_html: String,
    pub cards: Vec<ClauseCard>,
    pub summary: Summary,
    pub executive_summary: Vec<String>,
    pub chart: Vec<ChartSlice>,
    pub glossary: Vec<GlossaryEntry>,
}

/// Project `(raw_text, clauses)` into everything the page displays
pub fn render(raw_text: &str, clauses: &[Clause]) -> Presentation {
    let summary = summarize(clauses);

    Presentation {
        highlighted_html: highlight_document(raw_text, clauses),
        cards: clause_cards(clauses),
        executive_summary: executive_summary(&summary.top),
        chart: risk_chart(&summary.tally),
        glossary: GLOSSARY.to_vec(),
        summary,
    }
}

/// HTML-escape the document, then wrap every occurrence of each clause in a
/// colored span. Clauses are applied in order to the progressively
/// highlighted text.
pub fn highlight_document(raw_text: &str, clauses: &[Clause]) -> String {
    let mut highlighted = escape_html(raw_text);
    for clause in clauses {
        let sentence = escape_html(&clause.text);
        if sentence.is_empty() {
            continue;
        }
        let span = format!(
            "<span style='color:black; background-color:{}; font-weight:bold'>{}</span>",
            highlight_color(clause.risk_label),
            sentence
        );
        highlighted = highlighted.replace(&sentence, &span);
    }
    highlighted
}

pub fn card_heading(clause: &Clause) -> String {
    format!(
        "{} Risk: {}...",
        clause.risk_label.capitalized(),
        char_prefix(&clause.text, CARD_HEADING_CHARS)
    )
}

pub fn clause_cards(clauses: &[Clause]) -> Vec<ClauseCard> {
    clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| ClauseCard {
            index,
            heading: card_heading(clause),
            body: clause.text.clone(),
            risk_label: clause.risk_label,
            background: highlight_color(clause.risk_label),
            expanded: false,
            actions: ClauseAction::ALL.map(CardButton::from),
        })
        .collect()
}

/// Numbered one-line summaries of the top clauses
pub fn executive_summary(top: &[Clause]) -> Vec<String> {
    top.iter()
        .enumerate()
        .map(|(i, clause)| {
            format!(
                "{}. {} Risk: {}...",
                i + 1,
                clause.risk_label.capitalized(),
                char_prefix(&clause.text, SUMMARY_LINE_CHARS)
            )
        })
        .collect()
}

pub fn risk_chart(tally: &RiskTally) -> Vec<ChartSlice> {
    let total = tally.total();
    tally
        .entries()
        .into_iter()
        .map(|(label, count)| ChartSlice {
            label,
            name: match label {
                RiskLabel::High => "High Risk",
                RiskLabel::Medium => "Medium Risk",
                _ => "Low Risk",
            },
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
            color: chart_color(label),
        })
        .collect()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
