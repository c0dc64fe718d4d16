//! Prompt templates for the council flow

use crate::core::question::Question;
use crate::council::ranking::RANKING_MARKER;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Stage-2 ranking prompt over anonymized `(label, response)` pairs
    ///
    /// The formatting instructions here are load-bearing: the marker line
    /// and the numbered-list grammar are exactly what
    /// [`crate::council::ranking::parse_ranking`] consumes.
    pub fn ranking_prompt(question: &Question, responses: &[(String, String)]) -> String {
        let responses_text = responses
            .iter()
            .map(|(label, response)| format!("{label}:\n{response}"))
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
- Start with the line "{RANKING_MARKER}" (all caps, with colon)
- Then list the responses from best to worst as a numbered list
- Each line should be: number, period, space, then ONLY the response label (e.g., "1. Response A")
- Do not add any other text or explanations in the ranking section

Example of the correct format for your ENTIRE response:

Response A provides good detail on X but misses Y...
Response B is accurate but lacks depth on Z...
Response C offers the most comprehensive answer...

{RANKING_MARKER}
1. Response C
2. Response A
3. Response B

Now provide your evaluation and ranking:"#
        )
    }

    /// Stage-3 chairman prompt embedding both previous rounds verbatim
    pub fn synthesis_prompt(
        question: &Question,
        responses: &[(String, String)],
        rankings: &[(String, String)],
    ) -> String {
        let stage1_text = responses
            .iter()
            .map(|(model, response)| format!("Model: {model}\nResponse: {response}"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let stage2_text = rankings
            .iter()
            .map(|(model, ranking)| format!("Model: {model}\nRanking: {ranking}"))
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

    /// Prompt for generating a short conversation title
    pub fn title_prompt(question: &Question) -> String {
        format!(
            r#"Generate a very short title (3-5 words maximum) that summarizes the following question.
The title should be concise and descriptive. Do not use quotes or punctuation in the title.

Question: {question}

Title:"#
        )
    }

    /// Diagnostic text for the synthetic stage-1 entry when every council
    /// member failed. Echoes at most `max_errors` underlying errors.
    pub fn outage_notice(errors: &[String], max_errors: usize) -> String {
        let listed = errors
            .iter()
            .take(max_errors)
            .map(|e| format!("  - {e}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"All council models failed. Common causes:

1. API key limit exceeded: your key has reached its monthly limit
2. Invalid API key: check your OPENROUTER_API_KEY environment variable
3. Model not available: some models may not be accessible on this endpoint

Errors received:
{listed}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_prompt_embeds_marker_and_labels() {
        let question = Question::new("What is Rust?");
        let responses = vec![
            ("Response A".to_string(), "A systems language.".to_string()),
            ("Response B".to_string(), "A safe language.".to_string()),
        ];
        let prompt = PromptTemplate::ranking_prompt(&question, &responses);
        assert!(prompt.contains(RANKING_MARKER));
        assert!(prompt.contains("Response A:\nA systems language."));
        assert!(prompt.contains("Response B:"));
        assert!(prompt.contains("What is Rust?"));
    }

    #[test]
    fn test_synthesis_prompt_embeds_both_rounds() {
        let question = Question::new("What is Rust?");
        let responses = vec![("openai/gpt-4o".to_string(), "An answer.".to_string())];
        let rankings = vec![(
            "google/gemini-flash-1.5".to_string(),
            "FINAL RANKING:\n1. Response A".to_string(),
        )];
        let prompt = PromptTemplate::synthesis_prompt(&question, &responses, &rankings);
        assert!(prompt.contains("Model: openai/gpt-4o"));
        assert!(prompt.contains("Ranking: FINAL RANKING:"));
        assert!(prompt.contains("Chairman"));
    }

    #[test]
    fn test_title_prompt_contains_question() {
        let prompt = PromptTemplate::title_prompt(&Question::new("How do batteries work?"));
        assert!(prompt.contains("How do batteries work?"));
    }

    #[test]
    fn test_outage_notice_caps_error_list() {
        let errors: Vec<String> = (0..8).map(|i| format!("model-{i}: HTTP 500")).collect();
        let notice = PromptTemplate::outage_notice(&errors, 5);
        assert!(notice.contains("model-4: HTTP 500"));
        assert!(!notice.contains("model-5: HTTP 500"));
    }
}
