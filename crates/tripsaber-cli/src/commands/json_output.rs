//! JSON output types for machine-readable CLI output.
//!
//! Printed by `convert --json` and `inspect --json`.

use serde::{Deserialize, Serialize};

/// One converted difficulty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DifficultySummary {
    pub name: String,
    pub events: usize,
    pub gem_speed: f64,
}

/// Result of `convert --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub difficulties: Vec<DifficultySummary>,
    /// Written `.ats` path; absent on dry runs and failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConvertOutput {
    /// A failed conversion.
    pub fn failure(error: impl Into<String>, dry_run: bool) -> Self {
        Self {
            success: false,
            song_id: None,
            seed: None,
            map_hash: None,
            difficulties: Vec::new(),
            output_path: None,
            dry_run,
            error: Some(error.into()),
        }
    }
}

/// One declared difficulty as seen by `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DifficultyInspection {
    pub name: String,
    pub filename: String,
    pub note_jump_speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<usize>,
    #[serde(default)]
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    pub title: String,
    pub sub_title: String,
    pub artist: String,
    pub mapper: String,
    pub bpm: f64,
    pub song_filename: String,
    pub content_hash: String,
    pub characteristic: String,
    pub difficulties: Vec<DifficultyInspection>,
}
