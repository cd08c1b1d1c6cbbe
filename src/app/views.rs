//! View rendering (header, upload form, results)

use super::App;
use crate::constants::{APP_NAME, MIN_JOB_DESCRIPTION_CHARS};
use crate::theme;
use crate::types::BackendHealth;
use crate::ui::components::{bullet_list, chip_list, score_ring, section_heading};
use crate::utils::{format_bytes, rasterize_logo};
use eframe::egui;
use egui_phosphor::regular as icons;
use std::time::Instant;
use tracing::warn;

impl App {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal_centered(|ui| {
            if self.logo_texture.is_none() {
                if let Some((pixels, w, h)) = rasterize_logo(theme::LOGO_SIZE as u32 * 2) {
                    self.logo_texture = Some(ctx.load_texture(
                        "logo",
                        egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            if let Some(texture) = &self.logo_texture {
                ui.image(egui::load::SizedTexture::new(
                    texture.id(),
                    egui::vec2(theme::LOGO_SIZE, theme::LOGO_SIZE),
                ));
            }
            ui.add(
                egui::Label::new(
                    egui::RichText::new(APP_NAME.to_uppercase())
                        .size(theme::FONT_TITLE)
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let logs = ui
                    .add(theme::button(icons::FOLDER_OPEN))
                    .on_hover_text("Open log folder");
                if logs.clicked() {
                    if let Err(e) = open::that(self.logs_dir()) {
                        warn!(error = %e, "Failed to open log folder");
                    }
                }

                let (color, label) = match self.backend_health() {
                    BackendHealth::Online => (theme::STATUS_SUCCESS, "API online"),
                    BackendHealth::Offline => (theme::STATUS_ERROR, "API offline"),
                    BackendHealth::Unknown => (theme::TEXT_DIM, "Checking API..."),
                };
                ui.label(egui::RichText::new(label).size(theme::FONT_SMALL).color(theme::TEXT_MUTED))
                    .on_hover_text(self.settings.api_base());
                ui.colored_label(color, icons::CIRCLE);
            });
        });
    }

    pub(crate) fn render_upload_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let busy = self.is_busy();

        theme::card_frame().show(ui, |ui| {
            section_heading(ui, icons::FILE_TEXT, "Resume");

            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), theme::DROP_ZONE_HEIGHT),
                egui::Sense::click(),
            );
            let base = if self.drop_hover { theme::BG_HOVER } else { theme::BG_INPUT };
            let (fill, draw_rect) = theme::button_visual(&response, base, rect);
            let border = if self.drop_hover { theme::ACCENT } else { theme::BORDER_DEFAULT };
            let painter = ui.painter();
            painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);
            painter.rect_stroke(
                draw_rect,
                theme::RADIUS_LARGE,
                egui::Stroke::new(theme::STROKE_MEDIUM, border),
                egui::StrokeKind::Inside,
            );
            let center = draw_rect.center();
            painter.text(
                center - egui::vec2(0.0, 22.0),
                egui::Align2::CENTER_CENTER,
                icons::UPLOAD_SIMPLE,
                egui::FontId::proportional(28.0),
                theme::ACCENT,
            );
            painter.text(
                center + egui::vec2(0.0, 12.0),
                egui::Align2::CENTER_CENTER,
                "Drop your resume here or click to browse",
                egui::FontId::proportional(theme::FONT_BODY),
                theme::TEXT_SECONDARY,
            );
            painter.text(
                center + egui::vec2(0.0, 34.0),
                egui::Align2::CENTER_CENTER,
                "PDF, DOCX, DOC or TXT",
                egui::FontId::proportional(theme::FONT_SMALL),
                theme::TEXT_DIM,
            );
            if response.hovered() && !busy {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() && !busy {
                self.open_file_dialog();
            }

            if let Some(doc) = &self.selected {
                ui.add_space(theme::SPACING_MD);
                ui.horizontal(|ui| {
                    ui.colored_label(theme::STATUS_SUCCESS, icons::CHECK_CIRCLE);
                    ui.label(format!("Selected: {}", doc.name));
                    ui.label(
                        egui::RichText::new(format_bytes(doc.payload.len() as u64))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                });
            }
        });

        ui.add_space(theme::SPACING_LG);

        theme::card_frame().show(ui, |ui| {
            section_heading(ui, icons::BRIEFCASE, "Job description");
            let edit = ui.add_enabled(
                !busy,
                egui::TextEdit::multiline(&mut self.job_description)
                    .hint_text("Paste the full job description here...")
                    .desired_rows(theme::JOB_DESCRIPTION_ROWS)
                    .desired_width(f32::INFINITY),
            );
            if edit.changed() {
                self.validate_form();
            }

            let count = self.job_description.trim().chars().count();
            let color = if count > MIN_JOB_DESCRIPTION_CHARS {
                theme::ACCENT
            } else {
                theme::TEXT_DIM
            };
            ui.label(
                egui::RichText::new(format!(
                    "{count} characters (more than {MIN_JOB_DESCRIPTION_CHARS} required)"
                ))
                .size(theme::FONT_SMALL)
                .color(color),
            );
        });

        ui.add_space(theme::SPACING_LG);

        let enabled = self.submit_enabled && !busy;
        let submit = ui.add_enabled(
            enabled,
            theme::button_accent(format!("{}  Analyze Match", icons::MAGNIFYING_GLASS), enabled)
                .min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE)),
        );
        if submit.clicked() {
            self.start_analysis(ctx);
        }
    }

    pub(crate) fn render_results_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(results) = &self.results else {
            return;
        };
        let now = Instant::now();
        if results.is_animating(now) {
            ctx.request_repaint();
        }

        let mut new_analysis = false;

        theme::card_frame().show(ui, |ui| {
            ui.columns(2, |cols| {
                score_ring(
                    &mut cols[0],
                    results.match_score.frame(now),
                    results.match_score.tier(),
                    "Match Score",
                );
                score_ring(
                    &mut cols[1],
                    results.ats_score.frame(now),
                    results.ats_score.tier(),
                    "ATS Score",
                );
            });
            ui.add_space(theme::SPACING_SM);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Analyzed at {}",
                        results.received_at.format("%H:%M:%S")
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
                );
            });
        });

        ui.add_space(theme::SPACING_LG);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            section_heading(ui, icons::CHECK_CIRCLE, "Matched skills");
            chip_list(ui, &results.matched_skills, true);
            ui.add_space(theme::SPACING_LG);
            section_heading(ui, icons::X_CIRCLE, "Missing skills");
            chip_list(ui, &results.missing_skills, false);
        });

        ui.add_space(theme::SPACING_LG);

        for (icon, title, items) in [
            (icons::THUMBS_UP, "Strengths", &results.strengths),
            (icons::WARNING, "Weaknesses", &results.weaknesses),
            (icons::LIGHTBULB, "Improvements", &results.improvements),
        ] {
            theme::section_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                section_heading(ui, icon, title);
                bullet_list(ui, items);
            });
            ui.add_space(theme::SPACING_MD);
        }

        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            section_heading(ui, icons::FILE_TEXT, "Reasoning");
            ui.label(
                egui::RichText::new(&results.reasoning)
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_SECONDARY),
            );
        });

        ui.add_space(theme::SPACING_LG);

        let button = theme::button_accent(format!("{}  New Analysis", icons::ARROW_CLOCKWISE), true)
            .min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE));
        if ui.add(button).clicked() {
            new_analysis = true;
        }

        if new_analysis {
            self.reset();
        }
    }
}
