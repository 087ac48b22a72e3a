//! Console output formatter for workflow results

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use subquery_domain::{Answer, WorkflowResult};

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete workflow result
    pub fn format(result: &WorkflowResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Sub-question Decomposition"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            result.question
        ));

        // Phase 1 + 2: sub-questions and their answers
        output.push_str(&Self::section_header(&format!(
            "Sub-questions ({})",
            result.pairs.len()
        )));
        for (i, pair) in result.pairs.iter().enumerate() {
            let n = i + 1;
            let title = format!("── {}. {} ──", n, pair.sub_question);
            match &pair.answer {
                Answer::Found(text) => {
                    output.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), text));
                }
                Answer::NoResponse => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        title.red().bold(),
                        pair.answer.as_str().dimmed()
                    ));
                }
            }
        }

        let unanswered = result.unanswered_count();
        if unanswered > 0 {
            output.push_str(&format!(
                "\n{} {} of {} sub-questions had no answer\n",
                "!".yellow().bold(),
                unanswered,
                result.pairs.len()
            ));
        }

        // Phase 3
        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("\n{}\n", result.final_answer));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &WorkflowResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_answer_only(result: &WorkflowResult) -> String {
        let mut output = result.final_answer.trim_end().to_string();
        output.push('\n');
        output
    }

    /// Format a direct answer (no decomposition) for one question
    pub fn format_direct(question: &str, answer: &Answer) -> String {
        let text = match answer {
            Answer::Found(text) => text.normal(),
            Answer::NoResponse => answer.as_str().dimmed(),
        };
        format!("{} {}\n{} {}\n", "Q:".bold(), question, "A:".bold(), text)
    }

    /// Format direct answers (no decomposition) in the selected output format
    pub fn format_direct_batch(items: &[(&str, &Answer)], format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => items
                .iter()
                .map(|(question, answer)| Self::format_direct(question, answer))
                .collect(),
            OutputFormat::Answer => items
                .iter()
                .map(|(_, answer)| format!("{}\n", answer.as_str()))
                .collect(),
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = items
                    .iter()
                    .map(|(question, answer)| {
                        serde_json::json!({"question": question, "answer": answer})
                    })
                    .collect();
                let mut json =
                    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string());
                json.push('\n');
                json
            }
        }
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
    fn format(&self, result: &WorkflowResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &WorkflowResult) -> String {
        Self::format_json(result)
    }

    fn format_answer_only(&self, result: &WorkflowResult) -> String {
        Self::format_answer_only(result)
    }
}
