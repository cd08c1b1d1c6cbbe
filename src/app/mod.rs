//! App module - contains the main application state and logic

mod animation;
mod backend;
mod health;
mod input;
mod modals;
mod results;
mod status;
mod views;
mod workflow;

pub(crate) use animation::{ScoreFrame, ScoreTier};
use backend::{Backend, HttpBackend};
pub(crate) use results::ChipList;

use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use results::ResultsView;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::info;
use workflow::{RunOutcome, WorkflowView};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) backend: Arc<dyn Backend>,
    // Upload form
    pub(crate) selected: Option<SelectedDocument>,
    pub(crate) job_description: String,
    pub(crate) submit_enabled: bool,
    pub(crate) drop_hover: bool,
    // Workflow
    pub(crate) workflow: Arc<Mutex<WorkflowView>>,
    pub(crate) run_handle: Option<JoinHandle<RunOutcome>>,
    pub(crate) section: Section,
    pub(crate) results: Option<ResultsView>,
    pub(crate) error_message: Option<String>,
    // Backend health
    pub(crate) backend_health: Arc<Mutex<BackendHealth>>,
    pub(crate) health_check_started: bool,
    // Window
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(
            settings.api_base(),
            settings.request_timeout(),
        ));
        info!(url = %settings.api_base(), "Backend configured");

        Self::from_parts(settings, data_dir, runtime, backend)
    }

    pub fn from_parts(
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            settings,
            data_dir,
            runtime,
            backend,
            selected: None,
            job_description: String::new(),
            submit_enabled: false,
            drop_hover: false,
            workflow: Arc::new(Mutex::new(WorkflowView::default())),
            run_handle: None,
            section: Section::Upload,
            results: None,
            error_message: None,
            backend_health: Arc::new(Mutex::new(BackendHealth::Unknown)),
            health_check_started: false,
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    /// "New Analysis": drop the document, text and results and go back to the
    /// upload form.
    pub fn reset(&mut self) {
        info!("Starting new analysis");
        self.selected = None;
        self.results = None;
        self.section = Section::Upload;
        {
            let mut view = self.workflow.lock().unwrap();
            view.state = WorkflowState::Idle;
            view.status_text.clear();
        }
        self.set_job_description(String::new());
    }

    pub fn loading_overlay(&self) -> Option<String> {
        let view = self.workflow.lock().unwrap();
        view.loading_visible.then(|| view.status_text.clone())
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RequestFailure, RequestStage};
    use async_trait::async_trait;

    struct OfflineBackend;

    #[async_trait]
    impl Backend for OfflineBackend {
        async fn upload_resume(&self, _doc: &SelectedDocument) -> Result<String, RequestFailure> {
            Err(RequestFailure::new(RequestStage::Upload, None))
        }

        async fn analyze(&self, _id: &str, _job: &str) -> Result<AnalysisResult, RequestFailure> {
            Err(RequestFailure::new(RequestStage::Analyze, None))
        }

        async fn health(&self) -> BackendHealth {
            BackendHealth::Offline
        }
    }

    fn app() -> App {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        App::from_parts(
            Settings::default(),
            std::env::temp_dir(),
            runtime,
            Arc::new(OfflineBackend),
        )
    }

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("resume-match-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn long_job() -> String {
        "Senior Rust engineer for async networking services and tooling.".to_string()
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            match_score: 91,
            ats_score: 62,
            matched_skills: vec!["Rust".into()],
            missing_skills: Vec::new(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            improvements: Vec::new(),
            reasoning: String::new(),
        }
    }

    #[test]
    fn submit_enables_file_first() {
        let mut app = app();
        app.select_file(&temp_file("file-first.pdf", b"%PDF"));
        assert!(!app.submit_enabled);
        app.set_job_description("x".repeat(50));
        assert!(!app.submit_enabled);
        app.set_job_description("x".repeat(51));
        assert!(app.submit_enabled);
    }

    #[test]
    fn submit_enables_text_first() {
        let mut app = app();
        app.set_job_description(long_job());
        assert!(!app.submit_enabled);
        app.select_file(&temp_file("text-first.docx", b"PK"));
        assert!(app.submit_enabled);
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut app = app();
        app.select_file(&temp_file("keep.txt", b"resume"));
        app.set_job_description(long_job());
        assert!(app.submit_enabled);

        app.select_file(&temp_file("photo.jpg", b"\xff\xd8"));
        assert_eq!(app.selected.as_ref().map(|d| d.name.as_str()), Some("keep.txt"));
        assert!(app.submit_enabled);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Invalid file type. Please upload a PDF, DOCX, or TXT file.")
        );
    }

    #[test]
    fn new_selection_replaces_old_one() {
        let mut app = app();
        app.select_file(&temp_file("first.txt", b"one"));
        app.select_file(&temp_file("second.doc", b"two"));
        let doc = app.selected.as_ref().unwrap();
        assert_eq!(doc.name, "second.doc");
        assert_eq!(doc.payload, b"two");
    }

    #[test]
    fn finished_run_switches_to_results() {
        let mut app = app();
        app.workflow.lock().unwrap().pending_result = Some(sample_result());
        app.poll_workflow();
        assert_eq!(app.section, Section::Results);
        let results = app.results.as_ref().unwrap();
        assert_eq!(results.match_score.target(), 91);
        assert!(app.workflow.lock().unwrap().pending_result.is_none());
    }

    #[test]
    fn failed_run_reports_error_and_stays_on_upload() {
        let mut app = app();
        app.workflow.lock().unwrap().pending_error = Some("disk full".into());
        app.poll_workflow();
        assert_eq!(app.section, Section::Upload);
        assert_eq!(app.error_message.as_deref(), Some("disk full"));
        assert!(app.loading_overlay().is_none());
    }

    #[test]
    fn reset_clears_everything_and_disables_submit() {
        let mut app = app();
        app.select_file(&temp_file("reset.pdf", b"%PDF"));
        app.set_job_description(long_job());
        {
            let mut view = app.workflow.lock().unwrap();
            view.state = WorkflowState::Succeeded;
            view.status_text = "Finalizing AI-powered evaluation...".into();
            view.pending_result = Some(sample_result());
        }
        app.poll_workflow();
        assert!(app.submit_enabled);
        assert_eq!(app.section, Section::Results);

        app.reset();
        assert_eq!(app.workflow_state(), WorkflowState::Idle);
        assert!(app.workflow.lock().unwrap().status_text.is_empty());
        assert!(app.selected.is_none());
        assert!(app.job_description.is_empty());
        assert!(app.results.is_none());
        assert_eq!(app.section, Section::Upload);
        assert!(!app.submit_enabled);
    }

    #[test]
    fn submit_is_ignored_while_disabled() {
        let mut app = app();
        app.set_job_description("short");
        app.start_analysis(&egui::Context::default());
        assert!(app.run_handle.is_none());
    }

    #[test]
    fn failed_upload_returns_to_interactive_state() {
        let mut app = app();
        app.select_file(&temp_file("offline.pdf", b"%PDF"));
        app.set_job_description(long_job());
        app.start_analysis(&egui::Context::default());

        let handle = app.run_handle.take().expect("run spawned");
        let outcome = app.runtime.block_on(handle).unwrap();
        assert!(matches!(outcome, RunOutcome::Failed(_)));

        app.poll_workflow();
        assert_eq!(app.error_message.as_deref(), Some("Upload failed"));
        assert_eq!(app.workflow_state(), WorkflowState::Idle);
        assert!(app.loading_overlay().is_none());
        assert!(!app.is_busy());
    }
}
