use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(720.0);
        ui.add_space(40.0);
        styles::card_frame().show(ui, |ui| {
            ui.label(egui::RichText::new("About Synthesis").size(28.0).strong());
            ui.add_space(10.0);
            ui.colored_label(
                colors::TEXT_SECONDARY,
                "Synthesis is a multimodal synthetic healthcare data generator. A GAN trained on \
                 de-identified patient records produces tabular attributes together with random \
                 blood sugar time series, so teams can prototype without touching real patient data.",
            );
            ui.add_space(10.0);
            ui.colored_label(
                colors::TEXT_SECONDARY,
                format!("Connected to {}", state.config.server_url()),
            );
        });
    });
}
