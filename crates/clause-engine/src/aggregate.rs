use serde::Serialize;
use shared_types::{Clause, RiskTally};

/// Number of clauses in the executive summary
pub const TOP_CLAUSES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// First clauses in finder emission order, not sorted by severity
    pub top: Vec<Clause>,
    pub tally: RiskTally,
}

/// Take the leading clauses and count labels. Unclassified clauses are not
/// counted.
pub fn summarize(clauses: &[Clause]) -> Summary {
    let mut tally = RiskTally::default();
    for clause in clauses {
        tally.record(clause.risk_label);
    }

    Summary {
        top: clauses.iter().take(TOP_CLAUSES).cloned().collect(),
        tally,
    }
}
