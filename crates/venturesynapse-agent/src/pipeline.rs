// ABOUTME: Sequencer running the Discovery -> Scoring -> Memo stages against one completion runtime.
// ABOUTME: Each stage appends its input to a shared conversation, prints its output, and feeds the next stage.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::Instrument;
use ulid::Ulid;

use venturesynapse_core::{Conversation, InputBundle, Scorecard, Stage, StageOutput};

use crate::agent::Agent;
use crate::report;
use crate::runtime::{CompletionError, CompletionRuntime};

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} stage failed: {source}")]
    Completion {
        stage: Stage,
        #[source]
        source: CompletionError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run_id: Ulid,
    /// Stage outputs in execution order.
    pub outputs: Vec<StageOutput>,
    pub conversation: Conversation,
}

impl PipelineOutcome {
    /// Text produced by `stage`, empty if it did not run.
    pub fn output(&self, stage: Stage) -> &str {
        self.outputs
            .iter()
            .find(|o| o.stage == stage)
            .map(|o| o.text.as_str())
            .unwrap_or("")
    }

    /// The Scoring output read as a scorecard, if it parses.
    pub fn scorecard(&self) -> Option<Scorecard> {
        Scorecard::parse(self.output(Stage::Scoring)).ok()
    }
}

/// Runs the fixed three-stage screening sequence.
pub struct Pipeline {
    runtime: Arc<dyn CompletionRuntime>,
}

impl Pipeline {
    pub fn new(runtime: Arc<dyn CompletionRuntime>) -> Self {
        Self { runtime }
    }

    /// Run every stage in order, writing each stage block and the closing
    /// summary to `out`. The first failing call aborts the run.
    pub async fn run<W: Write>(
        &self,
        inputs: &InputBundle,
        out: &mut W,
    ) -> Result<PipelineOutcome, PipelineError> {
        let run_id = Ulid::new();
        let span = tracing::info_span!(
            "pipeline",
            %run_id,
            provider = self.runtime.provider_name(),
            model = self.runtime.model_name(),
        );

        self.run_stages(run_id, inputs, out).instrument(span).await
    }

    async fn run_stages<W: Write>(
        &self,
        run_id: Ulid,
        inputs: &InputBundle,
        out: &mut W,
    ) -> Result<PipelineOutcome, PipelineError> {
        let mut conversation = Conversation::new();
        let mut outputs: Vec<StageOutput> = Vec::with_capacity(Stage::ALL.len());

        for stage in Stage::ALL {
            let agent = Agent::new(stage.agent(), Arc::clone(&self.runtime));

            conversation.add_user_message(stage.build_input(inputs, &outputs));
            tracing::info!(stage = %stage, agent = agent.name(), "stage started");

            let text = agent
                .respond(&conversation)
                .await
                .map_err(|source| PipelineError::Completion { stage, source })?;

            conversation.add_agent_message(agent.name(), text.clone());
            tracing::info!(
                stage = %stage,
                agent = agent.name(),
                output_chars = text.chars().count(),
                latency_ms = conversation
                    .last_reply_latency()
                    .map(|d| d.num_milliseconds())
                    .unwrap_or_default(),
                "stage finished"
            );

            report::write_stage(out, agent.name(), &text)?;
            outputs.push(StageOutput::new(stage, text));
        }

        let outcome = PipelineOutcome {
            run_id,
            outputs,
            conversation,
        };

        match Scorecard::parse(outcome.output(Stage::Scoring)) {
            Ok(card) => tracing::info!(
                decision = %card.go_no_go,
                mean_score = card.scores.mean(),
                "scoring verdict"
            ),
            Err(e) => tracing::warn!(error = %e, "scoring output is not a valid scorecard"),
        }

        report::write_summary(
            out,
            outcome.output(Stage::Memo),
            outcome.output(Stage::Scoring),
        )?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EchoRuntime, ScriptedRuntime};
    use serde_json::json;
    use venturesynapse_core::Role;
    use venturesynapse_core::agent::{DISCOVERY, MEMO, SCORING};

    const SCORECARD: &str = r#"{"scores": {"fit": 4, "moat": 3, "gtm": 3, "risk": 2, "msft": 5, "unicorn": 2}, "summary": "Solid.", "go_no_go": "GO", "rationale": "Fits thesis."}"#;

    fn inputs() -> InputBundle {
        InputBundle {
            dynamics: json!({"company": "Acme"}),
            pitch_deck: "Procurement agents".to_string(),
            research_notes: "Two design partners".to_string(),
        }
    }

    #[tokio::test]
    async fn agents_run_in_fixed_order() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            "DISCOVERY-OUT",
            SCORECARD,
            "MEMO-OUT",
        ]));
        let pipeline = Pipeline::new(runtime.clone());

        let mut buf = Vec::new();
        pipeline.run(&inputs(), &mut buf).await.unwrap();

        let prompts: Vec<String> = runtime.calls().into_iter().map(|c| c.system_prompt).collect();
        assert_eq!(
            prompts,
            vec![
                DISCOVERY.system_prompt,
                SCORING.system_prompt,
                MEMO.system_prompt
            ]
        );
    }

    #[tokio::test]
    async fn later_stages_receive_prior_outputs() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            "DISCOVERY-OUT: vertical AI for procurement",
            SCORECARD,
            "MEMO-OUT",
        ]));
        let pipeline = Pipeline::new(runtime.clone());

        let mut buf = Vec::new();
        pipeline.run(&inputs(), &mut buf).await.unwrap();

        let calls = runtime.calls();
        assert_eq!(calls.len(), 3);

        let discovery_input = calls[0].last_user_message();
        assert!(discovery_input.contains("\"company\": \"Acme\""));
        assert!(discovery_input.contains("Procurement agents"));

        let scoring_input = calls[1].last_user_message();
        assert!(scoring_input.contains("DISCOVERY-OUT: vertical AI for procurement"));

        let memo_input = calls[2].last_user_message();
        assert!(memo_input.contains("DISCOVERY-OUT: vertical AI for procurement"));
        assert!(memo_input.contains(SCORECARD));
        assert!(memo_input.contains("\"company\": \"Acme\""));
    }

    #[tokio::test]
    async fn each_stage_sees_the_whole_conversation() {
        let runtime = Arc::new(EchoRuntime::new());
        let pipeline = Pipeline::new(runtime.clone());

        let mut buf = Vec::new();
        let outcome = pipeline.run(&inputs(), &mut buf).await.unwrap();

        let lens: Vec<usize> = runtime.calls().iter().map(|c| c.history.len()).collect();
        assert_eq!(lens, vec![1, 3, 5]);

        let roles: Vec<Role> = outcome.conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant
            ]
        );
        assert_eq!(outcome.conversation.messages()[5].author, "MemoAgent");
        assert!(
            outcome.conversation.last_reply_latency().is_some(),
            "run should end on the memo reply"
        );
    }

    #[tokio::test]
    async fn prints_stage_blocks_and_summary_in_order() {
        let runtime = Arc::new(ScriptedRuntime::new(vec!["disc", SCORECARD, "memo"]));
        let pipeline = Pipeline::new(runtime);

        let mut buf = Vec::new();
        let outcome = pipeline.run(&inputs(), &mut buf).await.unwrap();
        let printed = String::from_utf8(buf).unwrap();

        let positions: Vec<usize> = [
            "=== DiscoveryAgent ===",
            "=== ScoringAgent ===",
            "=== MemoAgent ===",
            report::SUMMARY_BANNER,
            "Scores (for quick copy):",
        ]
        .iter()
        .map(|marker| {
            printed
                .find(marker)
                .unwrap_or_else(|| panic!("missing {} in output:\n{}", marker, printed))
        })
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", printed);

        assert_eq!(outcome.output(Stage::Memo), "memo");
        assert_eq!(
            outcome.scorecard().map(|c| c.go_no_go),
            Some(venturesynapse_core::Decision::Go)
        );
    }

    #[tokio::test]
    async fn unparseable_scoring_output_is_forwarded_unchanged() {
        let runtime = Arc::new(ScriptedRuntime::new(vec!["disc", "fit looks like a 4", "memo"]));
        let pipeline = Pipeline::new(runtime.clone());

        let mut buf = Vec::new();
        let outcome = pipeline.run(&inputs(), &mut buf).await.unwrap();

        assert!(outcome.scorecard().is_none());
        assert!(runtime.calls()[2].last_user_message().contains("fit looks like a 4"));
    }

    #[tokio::test]
    async fn completion_failure_aborts_with_stage() {
        let runtime = Arc::new(ScriptedRuntime::new(vec!["disc"]));
        let pipeline = Pipeline::new(runtime.clone());

        let mut buf = Vec::new();
        let err = pipeline.run(&inputs(), &mut buf).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Completion {
                stage: Stage::Scoring,
                ..
            }
        ));
        assert!(err.to_string().contains("scoring"));
        assert_eq!(runtime.calls().len(), 2, "memo stage must not run");

        let printed = String::from_utf8(buf).unwrap();
        assert!(printed.contains("=== DiscoveryAgent ==="));
        assert!(!printed.contains(report::SUMMARY_BANNER));
    }
}
