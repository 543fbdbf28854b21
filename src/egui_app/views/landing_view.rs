use eframe::egui;

use crate::egui_app::router::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const FEATURES: [(&str, &str); 3] = [
    (
        "Multimodal records",
        "Tabular patient attributes paired with glucose time series.",
    ),
    (
        "Condition control",
        "Tune diabetes and hypertension prevalence before generating.",
    ),
    (
        "Train on your data",
        "Retrain the generator on cleaned datasets and inspect the loss.",
    ),
];

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(
            egui::RichText::new("Synthetic healthcare data, on demand")
                .size(40.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(
                "Generate, validate and train privacy-safe patient data to accelerate development.",
            )
            .size(18.0)
            .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(30.0);

        let (label, target) = if state.auth_state.is_authenticated() {
            ("Open workspace →", Route::Home)
        } else {
            ("Get Started →", Route::SignIn)
        };
        if ui.add(styles::primary_button(label)).clicked() {
            state.navigate(target);
        }
        ui.add_space(50.0);
    });

    ui.columns(FEATURES.len(), |columns| {
        for (column, (title, body)) in columns.iter_mut().zip(FEATURES) {
            styles::card_frame().show(column, |ui| {
                ui.set_min_height(110.0);
                ui.label(egui::RichText::new(title).size(20.0).strong());
                ui.add_space(6.0);
                ui.colored_label(colors::TEXT_SECONDARY, body);
            });
        }
    });
}
