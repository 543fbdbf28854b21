//! Theme Styling Functions
//!
//! Frame builders and the global style used by every screen.

use eframe::egui::{self, CornerRadius, Stroke};

use super::colors;
use crate::egui_app::toast::ToastKind;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = colors::BG_PAGE;
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(2.0, colors::OUTLINE);
    style.visuals.extreme_bg_color = colors::FIELD_BG;

    style.visuals.widgets.inactive.corner_radius = CornerRadius::same(8);
    style.visuals.widgets.hovered.corner_radius = CornerRadius::same(8);
    style.visuals.widgets.active.corner_radius = CornerRadius::same(8);
    style.visuals.widgets.hovered.bg_fill = colors::ACCENT_WARM;
    style.visuals.widgets.active.bg_fill = colors::ACCENT;

    style.visuals.selection.bg_fill = colors::ACCENT_WARM;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::OUTLINE);

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    ctx.set_style(style);
}

/// White card with a dark outline
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(2.0, colors::OUTLINE))
        .corner_radius(CornerRadius::same(16))
        .inner_margin(egui::Margin::same(24))
}

pub fn header_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::HEADER_BG)
        .inner_margin(egui::Margin::symmetric(24, 14))
}

pub fn page_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_PAGE)
        .inner_margin(egui::Margin::same(24))
}

/// Inline error banner used by forms and the Home workspace
pub fn banner_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(0xFE, 0xE2, 0xE2))
        .stroke(Stroke::new(1.0, colors::ERROR))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(10))
}

pub fn toast_frame(kind: ToastKind) -> egui::Frame {
    let fill = match kind {
        ToastKind::Info => colors::INFO,
        ToastKind::Success => colors::SUCCESS,
        ToastKind::Error => colors::ERROR,
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(14, 10))
}

/// Filled accent button
pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(colors::TEXT_ON_ACCENT).strong())
        .fill(colors::ACCENT)
        .stroke(Stroke::new(2.0, colors::OUTLINE))
        .min_size(egui::vec2(140.0, 36.0))
}
