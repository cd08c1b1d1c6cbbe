//! Common types and data structures

use serde::{Deserialize, Deserializer, Serialize};

/// Resume picked by the user. Replaced wholesale on every new selection.
#[derive(Clone, PartialEq)]
pub struct SelectedDocument {
    pub name: String,
    pub extension: String,
    pub payload: Vec<u8>,
}

impl std::fmt::Debug for SelectedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedDocument")
            .field("name", &self.name)
            .field("extension", &self.extension)
            .field("bytes", &self.payload.len())
            .finish()
    }
}

/// Phase of the upload → wait → analyze pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Uploading,
    Waiting,
    Analyzing,
    Succeeded,
    Failed,
}

impl WorkflowState {
    /// True while a pipeline run is in flight and the upload form must stay locked
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            WorkflowState::Uploading | WorkflowState::Waiting | WorkflowState::Analyzing
        )
    }
}

/// Which top-level view is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Upload,
    Results,
}

/// Backend reachability as reported by the health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendHealth {
    Unknown,
    Online,
    Offline,
}

/// Scoring payload returned by the analyze endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "score")]
    pub match_score: u8,
    #[serde(deserialize_with = "score")]
    pub ats_score: u8,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// Accept integer or float scores; clamp into 0..=100 and drop the fraction.
fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.clamp(0.0, 100.0) as u8)
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub resume_id: String,
}

#[derive(Serialize)]
pub struct AnalyzeRequest<'a> {
    pub resume_id: &'a str,
    pub job_description: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
}

/// Body of a non-2xx response
#[derive(Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}
