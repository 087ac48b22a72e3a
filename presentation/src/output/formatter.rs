//! Output formatter trait

use crate::cli::commands::OutputFormat;
use subquery_domain::WorkflowResult;

/// Trait for formatting workflow results
pub trait OutputFormatter {
    /// Format the complete result: every QA pair and the final answer
    fn format(&self, result: &WorkflowResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &WorkflowResult) -> String;

    /// Format the final answer only (concise output)
    fn format_answer_only(&self, result: &WorkflowResult) -> String;

    /// Format the result in the selected output format
    fn render(&self, result: &WorkflowResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Answer => self.format_answer_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
