//! Prompt templates for the decomposition workflow

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the decomposition phase
    pub fn decomposition_system() -> &'static str {
        r#"You are a helpful assistant that prepares queries that will be sent to a search component.
Sometimes, these queries are very complex.
Your job is to simplify complex queries into multiple queries that can be answered in isolation to each other.

Produce one sub-question per distinct named entity found in the question.
Write exactly one sub-question per line. Do not number them and do not add any other text.
If the query is simple and mentions a single entity, keep it as it is."#
    }

    /// User prompt for decomposition
    pub fn decomposition_query(question: &str) -> String {
        question.to_string()
    }

    /// System prompt for the synthesis phase
    pub fn synthesis_system() -> &'static str {
        r#"You are an assistant that combines answers to sub-questions into one final answer.
Use only the provided context. Some sub-questions may be answered with "no response found";
treat those as missing information and say so where it matters instead of guessing."#
    }

    /// User prompt for synthesis
    ///
    /// `context` is the formatted block of numbered question/answer pairs.
    pub fn synthesis_prompt(context: &str, question: &str) -> String {
        format!(
            r#"Here is a set of Q+A pairs:

{}

Use these to synthesize an answer to the question: {}"#,
            context, question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposition_system_mentions_entities() {
        assert!(PromptTemplate::decomposition_system().contains("named entity"));
    }

    #[test]
    fn test_synthesis_prompt_embeds_context_and_question() {
        let context = "Question 1: A?\nAnswer 1: yes";
        let prompt = PromptTemplate::synthesis_prompt(context, "A and B?");
        assert!(prompt.contains(context));
        assert!(prompt.ends_with("question: A and B?"));
    }
}
