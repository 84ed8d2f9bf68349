// ABOUTME: Loads the deal artifacts (CRM export, pitch deck notes, research notes) from an input directory.
// ABOUTME: Missing files fall back to empty values; unreadable files and malformed JSON are errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Directory the binary reads artifacts from when none is given.
pub const DEFAULT_INPUT_DIR: &str = "inputs";

pub const DYNAMICS_FILE: &str = "dynamics.json";
pub const PITCH_DECK_FILE: &str = "pitch_deck.txt";
pub const RESEARCH_NOTES_FILE: &str = "research_notes.txt";

/// Errors that can occur while loading the input artifacts.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to create input directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("{path} is not valid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The artifacts handed to the agents for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBundle {
    /// Dynamics CRM record, `{}` when no export was supplied.
    pub dynamics: Value,
    pub pitch_deck: String,
    pub research_notes: String,
}

impl Default for InputBundle {
    fn default() -> Self {
        Self {
            dynamics: Value::Object(serde_json::Map::new()),
            pitch_deck: String::new(),
            research_notes: String::new(),
        }
    }
}

impl InputBundle {
    /// The CRM record as it is interpolated into prompts: pretty-printed with
    /// two-space indentation, keys in file order.
    pub fn dynamics_json(&self) -> String {
        serde_json::to_string_pretty(&self.dynamics).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Load the artifacts from `dir`, creating the directory if it does not exist.
pub fn load_inputs(dir: impl AsRef<Path>) -> Result<InputBundle, BundleError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| BundleError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let dynamics_path = dir.join(DYNAMICS_FILE);
    let dynamics = match read_optional(&dynamics_path)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| BundleError::InvalidJson {
            path: dynamics_path.clone(),
            source,
        })?,
        None => Value::Object(serde_json::Map::new()),
    };

    let pitch_deck = read_optional(&dir.join(PITCH_DECK_FILE))?.unwrap_or_default();
    let research_notes = read_optional(&dir.join(RESEARCH_NOTES_FILE))?.unwrap_or_default();

    tracing::info!(
        dir = %dir.display(),
        pitch_deck_bytes = pitch_deck.len(),
        research_notes_bytes = research_notes.len(),
        "loaded input artifacts"
    );

    Ok(InputBundle {
        dynamics,
        pitch_deck,
        research_notes,
    })
}

/// Read a UTF-8 file, returning `None` if it does not exist.
fn read_optional(path: &Path) -> Result<Option<String>, BundleError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "artifact missing, using empty value");
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| BundleError::Read {
            path: path.to_path_buf(),
            source,
        })
}
