//! Sub-question parsing for the Decomposer.
//!
//! The text-generation backend returns untyped text. The only structure
//! assumed is "one sub-question per line"; nothing else about the content
//! is validated. This is pure domain logic; no I/O.

use crate::core::question::{Question, SubQuestion};

/// Parse raw decomposition output into an ordered list of sub-questions.
///
/// The output is split on line boundaries (`\n`, with a trailing `\r`
/// stripped from each line). Lines are kept verbatim and in order,
/// including empty lines between sub-questions.
///
/// If the output is empty or whitespace-only, nothing was decomposed and the
/// result is exactly the original question.
///
/// The returned list is never empty.
///
/// # Examples
///
/// ```
/// use subquery_domain::{Question, parse_sub_questions};
///
/// let q = Question::new("How did Bank A and Bank B do in 2023?");
///
/// let parts = parse_sub_questions("How did Bank A do in 2023?\nHow did Bank B do in 2023?", &q);
/// assert_eq!(parts.len(), 2);
///
/// let fallback = parse_sub_questions("", &q);
/// assert_eq!(fallback.len(), 1);
/// assert_eq!(fallback[0].content(), q.content());
/// ```
pub fn parse_sub_questions(raw: &str, question: &Question) -> Vec<SubQuestion> {
    if raw.trim().is_empty() {
        return vec![SubQuestion::from(question)];
    }

    raw.split('\n')
        .map(|line| SubQuestion::new(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}
