// ABOUTME: The fixed Discovery -> Scoring -> Memo stage order and each stage's input builder.
// ABOUTME: Input builders interpolate the artifacts and earlier stage outputs into the next user turn.

use std::fmt;

use crate::agent::{self, AgentSpec};
use crate::bundle::InputBundle;

/// One step of the screening pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Discovery,
    Scoring,
    Memo,
}

impl Stage {
    /// Every stage, in the order the sequencer runs them.
    pub const ALL: [Stage; 3] = [Stage::Discovery, Stage::Scoring, Stage::Memo];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Discovery => "discovery",
            Stage::Scoring => "scoring",
            Stage::Memo => "memo",
        }
    }

    /// The agent that handles this stage.
    pub fn agent(&self) -> AgentSpec {
        match self {
            Stage::Discovery => agent::DISCOVERY,
            Stage::Scoring => agent::SCORING,
            Stage::Memo => agent::MEMO,
        }
    }

    /// Build the user message that opens this stage. `prior` holds the
    /// outputs of the stages that already ran.
    pub fn build_input(&self, inputs: &InputBundle, prior: &[StageOutput]) -> String {
        match self {
            Stage::Discovery => format!(
                "Artifacts for evaluation (confidential):\n\n\
                 [DYNAMICS CRM]\n{}\n\n\
                 [PITCH DECK NOTES]\n{}\n\n\
                 [RESEARCH NOTES]\n{}\n\n\
                 Follow the pipeline strictly. Return only your role's deliverable each turn.\n",
                inputs.dynamics_json(),
                inputs.pitch_deck,
                inputs.research_notes
            ),
            Stage::Scoring => format!(
                "Use the artifacts and DiscoveryAgent output below:\n\n\
                 --- DISCOVERY\n{}\n---",
                output_of(prior, Stage::Discovery)
            ),
            Stage::Memo => format!(
                "Inputs for memo:\n\n\
                 --- DYNAMICS\n{}\n\n\
                 --- DISCOVERY\n{}\n\n\
                 --- SCORING(JSON)\n{}\n---",
                inputs.dynamics_json(),
                output_of(prior, Stage::Discovery),
                output_of(prior, Stage::Scoring)
            ),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The text one agent produced for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: Stage,
    pub agent: &'static str,
    pub text: String,
}

impl StageOutput {
    pub fn new(stage: Stage, text: String) -> Self {
        Self {
            stage,
            agent: stage.agent().name,
            text,
        }
    }
}

/// Text produced by `stage`, or an empty string if it has not run.
fn output_of(prior: &[StageOutput], stage: Stage) -> &str {
    prior
        .iter()
        .find(|o| o.stage == stage)
        .map(|o| o.text.as_str())
        .unwrap_or("")
}
