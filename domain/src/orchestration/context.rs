//! Recombination of sub-questions and answers into a context block.

use super::value_objects::{Answer, QaPair};
use crate::core::error::DomainError;
use crate::core::question::SubQuestion;

/// Pair sub-questions with answers by position.
///
/// The two sequences must have the same length; a mismatch is a broken
/// invariant and is reported instead of silently truncated.
pub fn pair_answers(
    sub_questions: &[SubQuestion],
    answers: &[Answer],
) -> Result<Vec<QaPair>, DomainError> {
    if sub_questions.len() != answers.len() {
        return Err(DomainError::LengthMismatch {
            sub_questions: sub_questions.len(),
            answers: answers.len(),
        });
    }

    Ok(sub_questions
        .iter()
        .zip(answers)
        .map(|(q, a)| QaPair::new(q.clone(), a.clone()))
        .collect())
}

/// Format QA pairs into the context block given to the synthesizer.
///
/// ```text
/// Question 1: <sub-question>
/// Answer 1: <answer>
///
/// Question 2: <sub-question>
/// Answer 2: <answer>
/// ```
///
/// Pairs are numbered from 1 in input order. Sentinel answers are kept.
pub fn format_qa_pairs(pairs: &[QaPair]) -> String {
    let formatted = pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let n = i + 1;
            format!(
                "Question {}: {}\nAnswer {}: {}",
                n, pair.sub_question, n, pair.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    formatted.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pairs_numbered_in_order() {
        let sub_questions = vec![
            SubQuestion::new("Q1 about Bank A"),
            SubQuestion::new("Q1 about Bank B"),
        ];
        let answers = vec![Answer::found("A did well"), Answer::found("B did poorly")];

        let pairs = pair_answers(&sub_questions, &answers).unwrap();
        let context = format_qa_pairs(&pairs);

        assert_eq!(
            context,
            "Question 1: Q1 about Bank A\nAnswer 1: A did well\n\n\
             Question 2: Q1 about Bank B\nAnswer 2: B did poorly"
        );
    }

    #[test]
    fn test_sentinel_is_kept() {
        let pairs = pair_answers(&[SubQuestion::new("Q")], &[Answer::NoResponse]).unwrap();
        assert_eq!(
            format_qa_pairs(&pairs),
            "Question 1: Q\nAnswer 1: no response found"
        );
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let pairs = pair_answers(&[SubQuestion::new("Q")], &[Answer::found("text\n\n")]).unwrap();
        let context = format_qa_pairs(&pairs);
        assert!(context.ends_with("Answer 1: text"));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let err = pair_answers(
            &[SubQuestion::new("a"), SubQuestion::new("b")],
            &[Answer::NoResponse],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::LengthMismatch {
                sub_questions: 2,
                answers: 1
            }
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let pairs = pair_answers(
            &[SubQuestion::new("a"), SubQuestion::new("b")],
            &[Answer::found("1"), Answer::NoResponse],
        )
        .unwrap();
        assert_eq!(format_qa_pairs(&pairs), format_qa_pairs(&pairs.clone()));
    }
}
