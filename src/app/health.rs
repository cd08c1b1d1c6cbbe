//! Background reachability check for the analysis backend

use super::App;
use crate::types::BackendHealth;
use eframe::egui;
use tracing::info;

impl App {
    /// Probe the backend once; the header reads the outcome each frame.
    pub fn check_backend_health(&mut self, ctx: &egui::Context) {
        if self.health_check_started {
            return;
        }
        self.health_check_started = true;

        let backend = self.backend.clone();
        let health = self.backend_health.clone();
        let ctx = ctx.clone();
        info!(url = %self.settings.api_base(), "Checking backend health");

        self.runtime.spawn(async move {
            let status = backend.health().await;
            info!(?status, "Backend health");
            *health.lock().unwrap() = status;
            ctx.request_repaint();
        });
    }

    pub fn backend_health(&self) -> BackendHealth {
        *self.backend_health.lock().unwrap()
    }
}
