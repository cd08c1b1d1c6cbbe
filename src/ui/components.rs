//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application. Text is always laid out as plain labels, so
//! strings coming from the backend are never interpreted.

use crate::app::{ChipList, ScoreFrame, ScoreTier};
use crate::constants::SCORE_RING_RADIUS;
use crate::theme;
use eframe::egui;

const RING_SEGMENTS: usize = 96;

/// Circular score indicator with the current value in the middle.
pub fn score_ring(ui: &mut egui::Ui, frame: ScoreFrame, tier: ScoreTier, caption: &str) {
    ui.vertical_centered(|ui| {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(theme::RING_SIZE, theme::RING_SIZE),
            egui::Sense::hover(),
        );
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            // Ring radius is defined on a 100-unit canvas
            let radius = SCORE_RING_RADIUS * theme::RING_SIZE / 100.0;
            let color = theme::tier_color(tier);

            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(theme::RING_STROKE, theme::RING_TRACK),
            );

            let fraction = frame.arc_fraction.clamp(0.0, 1.0);
            if fraction > 0.0 {
                let steps = ((RING_SEGMENTS as f32 * fraction).ceil() as usize).max(1);
                let sweep = std::f32::consts::TAU * fraction;
                let start = -std::f32::consts::FRAC_PI_2;
                let points: Vec<egui::Pos2> = (0..=steps)
                    .map(|i| {
                        let angle = start + sweep * i as f32 / steps as f32;
                        center + radius * egui::vec2(angle.cos(), angle.sin())
                    })
                    .collect();
                painter.add(egui::Shape::line(
                    points,
                    egui::Stroke::new(theme::RING_STROKE, color),
                ));
            }

            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                frame.value.to_string(),
                egui::FontId::proportional(theme::FONT_SCORE),
                theme::TEXT_PRIMARY,
            );
        }
        ui.add_space(theme::SPACING_SM);
        ui.add(
            egui::Label::new(
                egui::RichText::new(caption)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
    });
}

/// Pill-shaped skill label
pub fn skill_chip(ui: &mut egui::Ui, text: &str, matched: bool) {
    let (bg, fg) = theme::chip_colors(matched);
    egui::Frame::new()
        .fill(bg)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fg.gamma_multiply(0.4)))
        .corner_radius(theme::RADIUS_PILL)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.set_min_height(theme::CHIP_HEIGHT - 8.0);
            ui.label(egui::RichText::new(text).color(fg).size(theme::FONT_LABEL));
        });
}

pub fn chip_list(ui: &mut egui::Ui, chips: &ChipList, matched: bool) {
    match chips {
        ChipList::Chips(items) => {
            ui.horizontal_wrapped(|ui| {
                for item in items {
                    skill_chip(ui, item, matched);
                }
            });
        }
        ChipList::Placeholder(text) => {
            ui.label(egui::RichText::new(*text).color(theme::TEXT_DIM).italics());
        }
    }
}

/// Bulleted list of plain-text items
pub fn bullet_list(ui: &mut egui::Ui, items: &[String]) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
            ui.label(egui::RichText::new("•").color(theme::ACCENT));
            ui.label(egui::RichText::new(item).color(theme::TEXT_SECONDARY));
        });
    }
}

/// Small uppercase heading used above result blocks
pub fn section_heading(ui: &mut egui::Ui, icon: &str, text: &str) {
    ui.horizontal(|ui| {
        ui.colored_label(theme::ACCENT, icon);
        ui.add(
            egui::Label::new(
                egui::RichText::new(text.to_uppercase())
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
    });
    ui.add_space(theme::SPACING_SM);
}
