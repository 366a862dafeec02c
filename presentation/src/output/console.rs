//! Console output formatter for council outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{CouncilOutcome, Question};

/// Formats council outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete council outcome
    pub fn format(question: &Question, outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            question
        ));

        let models: Vec<String> = outcome.stage1.iter().map(|r| r.model.to_string()).collect();
        output.push_str(&format!(
            "{} {}\n\n",
            "Responded:".cyan().bold(),
            if models.is_empty() {
                "none".to_string()
            } else {
                models.join(", ")
            }
        ));

        // Stage 1
        output.push_str(&Self::section_header("Stage 1: Individual Responses"));
        for response in &outcome.stage1 {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", response.model).yellow().bold(),
                response.response
            ));
        }

        // Stage 2
        if !outcome.stage2.is_empty() {
            output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
            for ranking in &outcome.stage2 {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", ranking.model).yellow().bold(),
                    Self::deanonymize(&ranking.ranking, outcome)
                ));
                if !ranking.parsed_ranking.is_empty() {
                    output.push_str(&format!(
                        "{} {}\n",
                        "Extracted:".dimmed(),
                        ranking.parsed_ranking.join(" > ")
                    ));
                }
            }
        }

        // Aggregate
        if let Some(aggregate) = outcome
            .metadata
            .aggregate_rankings
            .as_ref()
            .filter(|a| !a.is_empty())
        {
            output.push_str(&Self::section_header("Aggregate Rankings"));
            for (position, entry) in aggregate.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} {}\n",
                    position + 1,
                    entry.model.to_string().bold(),
                    format!(
                        "(avg {:.2}, {} votes)",
                        entry.average_rank, entry.judge_count
                    )
                    .dimmed()
                ));
            }
        }

        // Stage 3
        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        let chairman = format!("Chairman: {}", outcome.stage3.model);
        let chairman = if outcome.stage3.is_sentinel() {
            chairman.red().bold()
        } else {
            chairman.yellow().bold()
        };
        output.push_str(&format!("\n{}\n\n{}\n", chairman, outcome.stage3.response));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &CouncilOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(question: &Question, outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));

        output.push_str(&format!(
            "{} {}\n\n",
            "Chairman:".dimmed(),
            outcome.stage3.model
        ));

        output.push_str(&outcome.stage3.response);
        output.push('\n');

        output
    }

    /// Replace `Response X` labels with bold model names for readability.
    fn deanonymize(text: &str, outcome: &CouncilOutcome) -> String {
        let Some(labels) = outcome.metadata.label_to_model.as_ref() else {
            return text.to_string();
        };
        labels.iter().fold(text.to_string(), |acc, (label, model)| {
            acc.replace(label, &model.to_string().bold().to_string())
        })
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &Question, outcome: &CouncilOutcome) -> String {
        Self::format(question, outcome)
    }

    fn format_json(&self, outcome: &CouncilOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_synthesis_only(&self, question: &Question, outcome: &CouncilOutcome) -> String {
        Self::format_synthesis_only(question, outcome)
    }
}
