//! Application constants and configuration

use std::time::Duration;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Resume Match";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const API_URL_ENV: &str = "RESUME_MATCH_API_URL";
pub const UPLOAD_PATH: &str = "/api/upload-resume";
pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/health";

/// Accepted resume extensions (lowercase, without the dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

/// Job description must be strictly longer than this after trimming
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

// Workflow timing
pub const ANALYSIS_DWELL: Duration = Duration::from_millis(30_000);
pub const STATUS_ROTATION_INTERVAL: Duration = Duration::from_millis(2_500);

// Loading overlay text
pub const MSG_UPLOADING: &str = "Uploading and processing resume...";
pub const MSG_FINALIZING: &str = "Finalizing AI-powered evaluation...";
pub const WAITING_MESSAGES: &[&str] = &[
    "Decoding resume structure...",
    "Mapping technical competencies...",
    "Synthesizing career insights...",
    "Matching with job requirements...",
];

// User-facing fallbacks and placeholders
pub const MSG_INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a PDF, DOCX, or TXT file.";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const ANALYSIS_FAILED: &str = "Analysis failed";
pub const NO_MISSING_SKILLS: &str = "No major skills missing!";
pub const NONE_IDENTIFIED: &str = "None identified";

// Score animation
pub const SCORE_ANIMATION_DURATION: Duration = Duration::from_millis(1_500);
pub const SCORE_RING_RADIUS: f32 = 45.0;
