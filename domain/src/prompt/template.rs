//! Prompt templates for the council flow

use crate::council::label::LabelMap;
use crate::council::parsing::FINAL_RANKING_MARKER;
use crate::council::{Stage1Result, Stage2Result};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Stage 2 prompt: every answer under its anonymous label, followed by
    /// the ranking instructions.
    ///
    /// Answers are paired with labels through `labels`, so the prompt and
    /// later aggregation agree on which label belongs to which answer.
    pub fn ranking_prompt(question: &str, responses: &[Stage1Result], labels: &LabelMap) -> String {
        let responses_text = labels
            .iter()
            .zip(responses)
            .map(|((label, _), response)| format!("{}:\n{}", label, response.response))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are evaluating different responses to the following question:

Question: {question}

Here are the responses from different models (anonymized):

{responses_text}

Your task:
1. First, evaluate each response individually. For each response, explain what it does well and what it does poorly.
2. Then, at the very end of your response, provide a final ranking.

IMPORTANT: Your final ranking MUST be formatted EXACTLY as follows:
- Start with the line "{marker}" (all caps, with colon)
- Then list the responses from best to worst as a numbered list
- Each line should be: number, period, space, then ONLY the response label (e.g., "1. Response A")
- Do not add any other text or explanations in the ranking section

Example of the correct format for your ENTIRE response:

Response A provides good detail on X but misses Y...
Response B is accurate but lacks depth on Z...
Response C offers the most comprehensive answer...

{marker}
1. Response C
2. Response A
3. Response B

Now provide your evaluation and ranking:"#,
            marker = FINAL_RANKING_MARKER,
        )
    }

    /// Stage 3 prompt: the question plus every stage-1 answer and stage-2
    /// critique, attributed to their real models.
    pub fn synthesis_prompt(
        question: &str,
        stage1: &[Stage1Result],
        stage2: &[Stage2Result],
    ) -> String {
        let stage1_text = stage1
            .iter()
            .map(|r| format!("Model: {}\nResponse: {}", r.model, r.response))
            .collect::<Vec<_>>()
            .join("\n\n");

        let stage2_text = stage2
            .iter()
            .map(|r| format!("Model: {}\nRanking: {}", r.model, r.ranking))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are the Chairman of an LLM Council. Multiple AI models have provided responses to a user's question, and then ranked each other's responses.

Original Question: {question}

STAGE 1 - Individual Responses:
{stage1_text}

STAGE 2 - Peer Rankings:
{stage2_text}

Your task as Chairman is to synthesize all of this information into a single, comprehensive, accurate answer to the user's original question. Consider:
- The individual responses and their insights
- The peer rankings and what they reveal about response quality
- Any patterns of agreement or disagreement

Provide a clear, well-reasoned final answer that represents the council's collective wisdom:"#
        )
    }

    /// Prompt asking for a 3-5 word conversation title.
    pub fn title_prompt(question: &str) -> String {
        format!(
            r#"Generate a very short title (3-5 words maximum) that summarizes the following question.
The title should be concise and descriptive. Do not use quotes or punctuation in the title.

Question: {question}

Title:"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;

    fn stage1() -> Vec<Stage1Result> {
        vec![
            Stage1Result::new(Model::Gpt51, "Rust is a systems programming language."),
            Stage1Result::new(Model::Grok4, "Rust focuses on safety and performance."),
        ]
    }

    #[test]
    fn test_ranking_prompt_is_anonymized() {
        let responses = stage1();
        let labels = LabelMap::from_responses(&responses);
        let prompt = PromptTemplate::ranking_prompt("What is Rust?", &responses, &labels);

        assert!(prompt.contains("Question: What is Rust?"));
        assert!(prompt.contains("Response A:\nRust is a systems programming language."));
        assert!(prompt.contains("Response B:\nRust focuses on safety and performance."));
        assert!(prompt.contains("FINAL RANKING:"));
        assert!(!prompt.contains("openai/gpt-5.1"));
        assert!(!prompt.contains("x-ai/grok-4"));
    }

    #[test]
    fn test_synthesis_prompt_names_models() {
        let stage2 = vec![Stage2Result::from_text(
            Model::Grok4,
            "FINAL RANKING:\n1. Response A",
        )];
        let prompt = PromptTemplate::synthesis_prompt("What is Rust?", &stage1(), &stage2);

        assert!(prompt.contains("Original Question: What is Rust?"));
        assert!(prompt.contains("Model: openai/gpt-5.1\nResponse: Rust is a systems"));
        assert!(prompt.contains("Model: x-ai/grok-4\nRanking: FINAL RANKING:"));
    }

    #[test]
    fn test_title_prompt_contains_question() {
        let prompt = PromptTemplate::title_prompt("How do lifetimes work?");
        assert!(prompt.contains("Question: How do lifetimes work?"));
        assert!(prompt.ends_with("Title:"));
    }
}
