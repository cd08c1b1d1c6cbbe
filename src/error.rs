//! Error types surfaced to the user

use crate::constants::{ANALYSIS_FAILED, MSG_INVALID_FILE_TYPE, UPLOAD_FAILED};
use std::path::PathBuf;
use thiserror::Error;

/// Selected file does not carry an accepted resume extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", MSG_INVALID_FILE_TYPE)]
pub struct FileTypeError {
    pub extension: String,
}

/// Errors raised while picking a resume from disk.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error(transparent)]
    FileType(#[from] FileTypeError),

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which backend call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Upload,
    Analyze,
}

impl RequestStage {
    pub fn fallback_message(self) -> &'static str {
        match self {
            RequestStage::Upload => UPLOAD_FAILED,
            RequestStage::Analyze => ANALYSIS_FAILED,
        }
    }
}

/// A backend call returned a non-success status, an undecodable body, or
/// never reached the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.user_message())]
pub struct RequestFailure {
    pub stage: RequestStage,
    pub message: Option<String>,
}

impl RequestFailure {
    pub fn new(stage: RequestStage, message: Option<String>) -> Self {
        Self { stage, message }
    }

    /// Server-supplied message, or the generic phrase for the stage
    pub fn user_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.stage.fallback_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failure_prefers_server_message() {
        let failure = RequestFailure::new(RequestStage::Upload, Some("disk full".into()));
        assert_eq!(failure.user_message(), "disk full");
        assert_eq!(failure.to_string(), "disk full");
    }

    #[test]
    fn request_failure_falls_back_per_stage() {
        assert_eq!(
            RequestFailure::new(RequestStage::Upload, None).user_message(),
            "Upload failed"
        );
        assert_eq!(
            RequestFailure::new(RequestStage::Analyze, Some(String::new())).user_message(),
            "Analysis failed"
        );
    }
}
