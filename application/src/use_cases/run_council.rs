//! Run Council use case
//!
//! Orchestrates the three-stage council flow: collect answers, peer-rank the
//! anonymized answers, and have a chairman synthesize the final answer.

use crate::config::CouncilConfig;
use crate::ports::llm_gateway::InferenceGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::fan_out::query_all;
use council_domain::{
    ChatMessage, CouncilMetadata, CouncilOutcome, CouncilRun, CouncilStage, LabelMap,
    PromptTemplate, Question, Stage1Result, Stage2Result, Stage3Result, aggregate_rankings,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Use case for running one council deliberation
///
/// Never fails: models that do not answer are dropped, and stage 3 always
/// produces a result, falling back to a fixed sentinel when nothing could be
/// synthesized.
pub struct RunCouncilUseCase {
    gateway: Arc<dyn InferenceGateway>,
    config: CouncilConfig,
}

impl RunCouncilUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>, config: CouncilConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &CouncilConfig {
        &self.config
    }

    /// Execute the full council with default (no-op) progress
    pub async fn execute(&self, question: &Question) -> CouncilOutcome {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the full council with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> CouncilOutcome {
        let mut run = CouncilRun::new(question.clone());
        info!("Starting council with {} models", self.config.panel.len());

        let stage1 = self.collect_responses(question, progress).await;
        if stage1.is_empty() {
            enter(&mut run, CouncilStage::Failed);
            warn!("All panel models failed; skipping ranking and synthesis");
            return CouncilOutcome::all_models_failed();
        }

        enter(&mut run, CouncilStage::Ranking);
        let (stage2, labels) = self.collect_rankings(question, &stage1, progress).await;
        let aggregate = aggregate_rankings(&stage2, &labels);

        enter(&mut run, CouncilStage::Synthesizing);
        let stage3 = self.synthesize(question, &stage1, &stage2, progress).await;

        enter(&mut run, CouncilStage::Done);
        CouncilOutcome {
            stage1,
            stage2,
            stage3,
            metadata: CouncilMetadata::rankings(labels, aggregate),
        }
    }

    /// Stage 1: ask every panel member the raw question in parallel.
    ///
    /// Only models that answered appear, in panel order.
    pub async fn collect_responses(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Stage1Result> {
        info!("Stage 1: Collect Responses");
        progress.on_stage_start(CouncilStage::Collecting, self.config.panel.len());

        let messages = [ChatMessage::user(question.content())];
        let replies = query_all(
            &self.gateway,
            &self.config.panel,
            &messages,
            self.config.query_timeout,
            CouncilStage::Collecting,
            progress,
        )
        .await;

        progress.on_stage_complete(CouncilStage::Collecting);

        replies
            .into_iter()
            .filter_map(|(model, reply)| reply.map(|r| Stage1Result::new(model, r.content)))
            .collect()
    }

    /// Stage 2: every panel member critiques and ranks the anonymized answers.
    ///
    /// Returns the rankings of the judges that answered, in panel order,
    /// together with the label mapping used in the prompt.
    pub async fn collect_rankings(
        &self,
        question: &Question,
        stage1: &[Stage1Result],
        progress: &dyn ProgressNotifier,
    ) -> (Vec<Stage2Result>, LabelMap) {
        info!("Stage 2: Peer Ranking");
        progress.on_stage_start(CouncilStage::Ranking, self.config.panel.len());

        let labels = LabelMap::from_responses(stage1);
        let prompt = PromptTemplate::ranking_prompt(question.content(), stage1, &labels);
        let messages = [ChatMessage::user(prompt)];

        let replies = query_all(
            &self.gateway,
            &self.config.panel,
            &messages,
            self.config.query_timeout,
            CouncilStage::Ranking,
            progress,
        )
        .await;

        progress.on_stage_complete(CouncilStage::Ranking);

        let stage2 = replies
            .into_iter()
            .filter_map(|(model, reply)| reply.map(|r| Stage2Result::from_text(model, r.content)))
            .collect();
        (stage2, labels)
    }

    /// Stage 3: the chairman synthesizes the final answer.
    ///
    /// Candidates are tried one at a time; the first reply wins. When every
    /// candidate fails the result is the chairman-exhausted sentinel,
    /// attributed to the primary chairman.
    pub async fn synthesize(
        &self,
        question: &Question,
        stage1: &[Stage1Result],
        stage2: &[Stage2Result],
        progress: &dyn ProgressNotifier,
    ) -> Stage3Result {
        info!("Stage 3: Synthesis");
        progress.on_stage_start(CouncilStage::Synthesizing, 1);

        let prompt = PromptTemplate::synthesis_prompt(question.content(), stage1, stage2);
        let messages = [ChatMessage::user(prompt)];

        for candidate in self.config.chairman_candidates() {
            let reply = self
                .gateway
                .query(&candidate, &messages, self.config.query_timeout)
                .await;
            progress.on_task_complete(CouncilStage::Synthesizing, &candidate, reply.is_some());

            if let Some(reply) = reply {
                info!("Chairman {} produced the synthesis", candidate);
                progress.on_stage_complete(CouncilStage::Synthesizing);
                return Stage3Result::new(candidate, reply.content);
            }
            warn!("Chairman candidate {} failed, trying next", candidate);
        }

        progress.on_stage_complete(CouncilStage::Synthesizing);
        Stage3Result::chairman_exhausted(self.config.chairman.clone())
    }
}

fn enter(run: &mut CouncilRun, next: CouncilStage) {
    match run.advance(next) {
        Ok(()) => info!(stage = next.as_str(), "Council stage"),
        Err(e) => error!("Council state machine rejected transition: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;
    use council_domain::Model;
    use council_domain::council::value_objects::{
        ALL_MODELS_FAILED_RESPONSE, CHAIRMAN_EXHAUSTED_RESPONSE,
    };

    fn question() -> Question {
        Question::try_new("What is Rust?").unwrap()
    }

    fn two_model_config() -> CouncilConfig {
        CouncilConfig::default().with_panel(vec![Model::Gpt51, Model::Grok4])
    }

    #[tokio::test]
    async fn test_full_council() {
        let gateway = ScriptedGateway::new()
            .answer(Model::Gpt51, "Rust is a systems language.")
            .answer(Model::Grok4, "Rust is memory safe.")
            .rank(Model::Gpt51, "FINAL RANKING:\n1. Response B\n2. Response A")
            .rank(Model::Grok4, "FINAL RANKING:\n1. Response B\n2. Response A")
            .synthesize(Model::Gpt51, "Rust is a memory safe systems language.");
        let use_case = RunCouncilUseCase::new(Arc::new(gateway), two_model_config());

        let outcome = use_case.execute(&question()).await;

        assert_eq!(outcome.stage1.len(), 2);
        assert_eq!(outcome.stage1[0].model, Model::Gpt51);
        assert_eq!(outcome.stage2.len(), 2);
        assert_eq!(
            outcome.stage2[0].parsed_ranking,
            vec!["Response B", "Response A"]
        );
        assert_eq!(outcome.stage3.model, Model::Gpt51);
        assert_eq!(
            outcome.stage3.response,
            "Rust is a memory safe systems language."
        );

        let labels = outcome.metadata.label_to_model.unwrap();
        assert_eq!(labels.resolve("Response A"), Some(&Model::Gpt51));
        assert_eq!(labels.resolve("Response B"), Some(&Model::Grok4));

        let aggregate = outcome.metadata.aggregate_rankings.unwrap();
        assert_eq!(aggregate[0].model, Model::Grok4);
        assert_eq!(aggregate[0].average_rank, 1.0);
        assert_eq!(aggregate[0].judge_count, 2);
    }

    #[tokio::test]
    async fn test_all_models_failed() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunCouncilUseCase::new(gateway.clone(), two_model_config());

        let outcome = use_case.execute(&question()).await;

        assert!(outcome.stage1.is_empty());
        assert!(outcome.stage2.is_empty());
        assert_eq!(outcome.stage3.model.as_str(), "error");
        assert_eq!(outcome.stage3.response, ALL_MODELS_FAILED_RESPONSE);
        assert!(outcome.metadata.is_empty());
        // Only the two stage-1 calls were made
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_labels_follow_successful_responses() {
        let gateway = ScriptedGateway::new()
            .answer(Model::Grok4, "only grok answered")
            .rank(Model::Grok4, "FINAL RANKING:\n1. Response A")
            .synthesize(Model::Gpt51, "final");
        let use_case = RunCouncilUseCase::new(Arc::new(gateway), two_model_config());

        let outcome = use_case.execute(&question()).await;

        assert_eq!(outcome.stage1.len(), 1);
        let labels = outcome.metadata.label_to_model.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.resolve("Response A"), Some(&Model::Grok4));
        assert_eq!(outcome.stage2.len(), 1);
    }

    #[tokio::test]
    async fn test_chairman_falls_back_in_order() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answer(Model::Gpt51, "a")
                .answer(Model::Grok4, "b")
                .synthesize(Model::Gemini3Pro, "from the second fallback"),
        );
        let use_case = RunCouncilUseCase::new(gateway.clone(), two_model_config());

        let outcome = use_case.execute(&question()).await;

        assert_eq!(outcome.stage3.model, Model::Gemini3Pro);
        assert_eq!(outcome.stage3.response, "from the second fallback");

        let synthesis_calls: Vec<Model> = gateway
            .calls()
            .into_iter()
            .filter(|(_, prompt)| prompt.contains("Chairman"))
            .map(|(model, _)| model)
            .collect();
        assert_eq!(
            synthesis_calls,
            vec![Model::Gpt51, Model::Gpt4oMini, Model::Gemini3Pro]
        );
    }

    #[tokio::test]
    async fn test_chairman_exhausted() {
        let gateway = ScriptedGateway::new()
            .answer(Model::Gpt51, "a")
            .answer(Model::Grok4, "b");
        let use_case = RunCouncilUseCase::new(Arc::new(gateway), two_model_config());

        let outcome = use_case.execute(&question()).await;

        assert_eq!(outcome.stage3.model, Model::Gpt51);
        assert_eq!(outcome.stage3.response, CHAIRMAN_EXHAUSTED_RESPONSE);
        assert!(outcome.stage3.is_sentinel());
        // Ranking failures leave stage 2 empty but metadata present
        assert!(outcome.stage2.is_empty());
        assert_eq!(outcome.metadata.aggregate_rankings, Some(vec![]));
    }

    #[tokio::test]
    async fn test_ranking_prompt_shows_every_answer() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .answer(Model::Gpt51, "first answer")
                .answer(Model::Grok4, "second answer"),
        );
        let use_case = RunCouncilUseCase::new(gateway.clone(), two_model_config());

        use_case.execute(&question()).await;

        let ranking_prompts: Vec<String> = gateway
            .calls()
            .into_iter()
            .filter(|(_, prompt)| prompt.contains("FINAL RANKING:") && !prompt.contains("Chairman"))
            .map(|(_, prompt)| prompt)
            .collect();
        assert_eq!(ranking_prompts.len(), 2);
        for prompt in ranking_prompts {
            assert!(prompt.contains("Response A:\nfirst answer"));
            assert!(prompt.contains("Response B:\nsecond answer"));
        }
    }

    #[test]
    fn test_stage3_sentinel_helpers() {
        assert!(Stage3Result::all_models_failed().is_sentinel());
    }
}
