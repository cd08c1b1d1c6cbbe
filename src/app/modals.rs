//! Modal surfaces: loading overlay and error dialog

use super::App;
use crate::theme;
use eframe::egui;

impl App {
    /// Blocking overlay shown while a run is in flight
    pub(crate) fn render_loading_overlay(&mut self, ctx: &egui::Context) {
        let Some(status) = self.loading_overlay() else {
            return;
        };

        egui::Modal::new(egui::Id::new("loading_overlay"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(360.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(theme::SPACING_MD);
                    ui.add(egui::Spinner::new().size(32.0).color(theme::ACCENT));
                    ui.add_space(theme::SPACING_LG);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(status)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .selectable(false),
                    );
                    ui.add_space(theme::SPACING_MD);
                });
            });
    }

    pub(crate) fn render_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };

        let mut dismissed = false;
        let response = egui::Modal::new(egui::Id::new("error_dialog"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(380.0);
                ui.horizontal(|ui| {
                    ui.colored_label(theme::STATUS_ERROR, egui_phosphor::regular::WARNING);
                    ui.label(
                        egui::RichText::new("Error")
                            .size(theme::FONT_HEADING)
                            .color(theme::TEXT_PRIMARY),
                    );
                });
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(&message).color(theme::TEXT_SECONDARY));
                ui.add_space(theme::SPACING_XL);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button("OK")).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || response.should_close() {
            self.error_message = None;
        }
    }
}
