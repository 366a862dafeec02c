//! Output formatter trait

use council_domain::{CouncilOutcome, Question};

/// Trait for formatting council outcomes
pub trait OutputFormatter {
    /// Format every stage plus the aggregate ranking
    fn format(&self, question: &Question, outcome: &CouncilOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &CouncilOutcome) -> String;

    /// Format synthesis only (concise output)
    fn format_synthesis_only(&self, question: &Question, outcome: &CouncilOutcome) -> String;
}
