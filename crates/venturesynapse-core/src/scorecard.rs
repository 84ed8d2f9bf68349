// ABOUTME: Lenient reader for the Scoring agent's JSON verdict (scores, summary, go/no-go, rationale).
// ABOUTME: Only used for logging; the raw scoring text is what the pipeline forwards and prints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Investment recommendation returned by the Scoring agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Go,
    LearnMore,
    NoGo,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Go => "GO",
            Decision::LearnMore => "LEARN_MORE",
            Decision::NoGo => "NO_GO",
        })
    }
}

/// Per-dimension scores on a 0-5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub fit: f64,
    pub moat: f64,
    pub gtm: f64,
    pub risk: f64,
    pub msft: f64,
    pub unicorn: f64,
}

impl Scores {
    pub fn mean(&self) -> f64 {
        (self.fit + self.moat + self.gtm + self.risk + self.msft + self.unicorn) / 6.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub scores: Scores,
    #[serde(default)]
    pub summary: String,
    pub go_no_go: Decision,
    #[serde(default)]
    pub rationale: String,
}

impl Scorecard {
    /// Parse a scorecard out of free-form model output. Tolerates markdown
    /// fences and prose around the object by taking the outermost `{...}`.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(extract_object(text))
    }
}

/// Slice from the first `{` to the last `}`, or the whole text if there is no object.
fn extract_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}
