//! Upload → dwell → analyze pipeline

use super::backend::Backend;
use super::input::can_submit;
use super::results::ResultsView;
use super::status::{StatusRotator, StatusSink};
use super::App;
use crate::constants::*;
use crate::error::RequestFailure;
use crate::types::*;
use eframe::egui;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the pipeline reports its progress. Every method is display-only.
pub trait WorkflowSink: StatusSink {
    fn set_state(&self, state: WorkflowState);
    fn show_loading(&self, text: &str);
    fn hide_loading(&self);
    fn report_error(&self, message: &str);
    fn present_results(&self, result: AnalysisResult);
}

/// How a run ended
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// Inputs did not pass the gate; nothing was sent
    NotReady,
    Succeeded,
    Failed(RequestFailure),
}

pub struct Orchestrator<S: WorkflowSink> {
    backend: Arc<dyn Backend>,
    sink: Arc<S>,
    dwell: Duration,
    rotation_interval: Duration,
}

impl<S: WorkflowSink> Orchestrator<S> {
    pub fn new(backend: Arc<dyn Backend>, sink: Arc<S>) -> Self {
        Self {
            backend,
            sink,
            dwell: ANALYSIS_DWELL,
            rotation_interval: STATUS_ROTATION_INTERVAL,
        }
    }

    /// Run the whole pipeline once. The loading overlay is hidden on every
    /// exit path, and a failure always lands back in `Idle`.
    pub async fn run(&self, doc: SelectedDocument, job_description: String) -> RunOutcome {
        if !can_submit(Some(&doc), &job_description) {
            return RunOutcome::NotReady;
        }
        let job_description = job_description.trim();

        let mut rotator = StatusRotator::new(self.sink.clone());
        let outcome = self.pipeline(&doc, job_description, &mut rotator).await;
        rotator.stop();

        match outcome {
            Ok(result) => {
                info!(
                    match_score = result.match_score,
                    ats_score = result.ats_score,
                    "Analysis complete"
                );
                self.sink.set_state(WorkflowState::Succeeded);
                self.sink.present_results(result);
                self.sink.hide_loading();
                RunOutcome::Succeeded
            }
            Err(failure) => {
                warn!(stage = ?failure.stage, message = %failure, "Workflow failed");
                self.sink.set_state(WorkflowState::Failed);
                self.sink.hide_loading();
                self.sink.report_error(failure.user_message());
                self.sink.set_state(WorkflowState::Idle);
                RunOutcome::Failed(failure)
            }
        }
    }

    async fn pipeline(
        &self,
        doc: &SelectedDocument,
        job_description: &str,
        rotator: &mut StatusRotator,
    ) -> Result<AnalysisResult, RequestFailure> {
        info!(name = %doc.name, bytes = doc.payload.len(), "Uploading resume");
        self.sink.set_state(WorkflowState::Uploading);
        self.sink.show_loading(MSG_UPLOADING);

        let resume_id = self.backend.upload_resume(doc).await?;

        info!(resume_id = %resume_id, dwell_ms = self.dwell.as_millis() as u64, "Upload complete, waiting for indexing");
        self.sink.set_state(WorkflowState::Waiting);
        let messages = WAITING_MESSAGES.iter().map(|m| m.to_string()).collect();
        rotator.start(messages, self.rotation_interval);

        tokio::time::sleep(self.dwell).await;

        rotator.stop();
        self.sink.set_state(WorkflowState::Analyzing);
        self.sink.show_status(MSG_FINALIZING);
        info!(resume_id = %resume_id, "Requesting analysis");

        self.backend.analyze(&resume_id, job_description).await
    }
}

// ============================================================================
// SHARED VIEW STATE
// ============================================================================

/// Written by the worker task, polled by the frame loop.
#[derive(Default)]
pub struct WorkflowView {
    pub state: WorkflowState,
    pub loading_visible: bool,
    pub status_text: String,
    pub pending_result: Option<AnalysisResult>,
    pub pending_error: Option<String>,
}

/// Sink that writes into the shared view and wakes the UI.
pub struct ViewSink {
    view: Arc<Mutex<WorkflowView>>,
    ctx: egui::Context,
}

impl ViewSink {
    pub fn new(view: Arc<Mutex<WorkflowView>>, ctx: egui::Context) -> Self {
        Self { view, ctx }
    }

    fn update(&self, f: impl FnOnce(&mut WorkflowView)) {
        f(&mut self.view.lock().unwrap());
        self.ctx.request_repaint();
    }
}

impl StatusSink for ViewSink {
    fn show_status(&self, text: &str) {
        self.update(|v| v.status_text = text.to_string());
    }
}

impl WorkflowSink for ViewSink {
    fn set_state(&self, state: WorkflowState) {
        self.update(|v| v.state = state);
    }

    fn show_loading(&self, text: &str) {
        self.update(|v| {
            v.status_text = text.to_string();
            v.loading_visible = true;
        });
    }

    fn hide_loading(&self) {
        self.update(|v| v.loading_visible = false);
    }

    fn report_error(&self, message: &str) {
        self.update(|v| v.pending_error = Some(message.to_string()));
    }

    fn present_results(&self, result: AnalysisResult) {
        self.update(|v| v.pending_result = Some(result));
    }
}

// ============================================================================
// APP INTEGRATION
// ============================================================================

impl App {
    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow.lock().unwrap().state
    }

    /// True from the moment a run is spawned until its task finishes
    pub fn is_busy(&self) -> bool {
        self.run_handle.as_ref().is_some_and(|h| !h.is_finished()) || self.workflow_state().is_busy()
    }

    /// Submit action. Ignored unless the form is valid and no run is in flight.
    pub fn start_analysis(&mut self, ctx: &egui::Context) {
        if !self.submit_enabled || self.is_busy() {
            return;
        }
        let Some(doc) = self.selected.clone() else {
            return;
        };
        if self.job_description.trim().is_empty() {
            return;
        }

        let sink = Arc::new(ViewSink::new(self.workflow.clone(), ctx.clone()));
        let orchestrator = Orchestrator::new(self.backend.clone(), sink);
        let job_description = self.job_description.clone();

        self.run_handle = Some(
            self.runtime
                .spawn(async move { orchestrator.run(doc, job_description).await }),
        );
    }

    /// Pick up results and errors published by the worker task.
    pub fn poll_workflow(&mut self) {
        let (result, error) = {
            let mut view = self.workflow.lock().unwrap();
            (view.pending_result.take(), view.pending_error.take())
        };

        if let Some(result) = result {
            let view = ResultsView::new(result);
            debug!(
                match_score = view.match_score.target(),
                ats_score = view.ats_score.target(),
                "Showing results"
            );
            self.results = Some(view);
            self.section = Section::Results;
        }
        if let Some(message) = error {
            self.error_message = Some(message);
        }
    }
}
