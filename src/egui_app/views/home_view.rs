use eframe::egui;

use crate::egui_app::home::{
    rbs_series, HomeTab, PreviewTable, EPOCH_RANGE, RATIO_STEP, RECORD_COUNT_RANGE, RECORD_COUNT_STEP,
};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::dataset::{GeneratedDataset, SamplePatient, ServiceHealth};

const CHART_SIZE: egui::Vec2 = egui::vec2(260.0, 90.0);
const MAX_CHARTS: usize = 3;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.heading(
            egui::RichText::new("Synthetic Healthcare Data")
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            render_health(ui, state);
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        for tab in HomeTab::ALL {
            let selected = state.home.active_tab == tab;
            let text = egui::RichText::new(tab.label()).color(if selected {
                colors::TAB_ACTIVE
            } else {
                colors::TEXT_SECONDARY
            });
            if ui.selectable_label(selected, text).clicked() {
                state.home.active_tab = tab;
            }
        }
    });
    ui.separator();

    if let Some(ref error) = state.home.error {
        styles::banner_frame().show(ui, |ui| {
            ui.colored_label(colors::ERROR, error);
        });
        ui.add_space(8.0);
    }

    match state.home.active_tab {
        HomeTab::Generate => render_generate(ui, state),
        HomeTab::Validation => render_validation(ui, state),
        HomeTab::Training => render_training(ui, state),
        HomeTab::About => render_about_data(ui),
    }
}

fn render_health(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.small_button("⟳").on_hover_text("Check service").clicked() {
        state.check_health();
    }
    let (color, text) = health_line(state.home.health.as_ref());
    ui.colored_label(color, text);
}

fn health_line(health: Option<&ServiceHealth>) -> (egui::Color32, String) {
    let Some(health) = health else {
        return (colors::TEXT_SECONDARY, "Service status unknown".to_string());
    };
    let status = health.status.as_deref().unwrap_or("unknown");
    let models = match health.models_loaded {
        Some(true) => "models loaded",
        Some(false) => "models not loaded",
        None => "models unknown",
    };
    let device = health.device.as_deref().unwrap_or("n/a");
    let color = if status.eq_ignore_ascii_case("healthy") || status.eq_ignore_ascii_case("ok") {
        colors::SUCCESS
    } else {
        colors::ERROR
    };
    (color, format!("Service {} · {} · {}", status, models, device))
}

fn render_generate(ui: &mut egui::Ui, state: &mut AppState) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Generation parameters").strong());
        ui.add_space(6.0);

        let home = &mut state.home;
        ui.add(
            egui::Slider::new(&mut home.record_count, RECORD_COUNT_RANGE)
                .step_by(RECORD_COUNT_STEP as f64)
                .text("Number of records"),
        );
        ui.add(
            egui::Slider::new(&mut home.diabetes_ratio, 0.0..=1.0)
                .step_by(RATIO_STEP)
                .text("Diabetes ratio"),
        );
        ui.add(
            egui::Slider::new(&mut home.hypertension_ratio, 0.0..=1.0)
                .step_by(RATIO_STEP)
                .text("Hypertension ratio"),
        );
        ui.add_space(10.0);

        let busy = state.is_generating();
        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, styles::primary_button("Generate Data")).clicked() {
                state.handle_generate();
            }
            if busy {
                ui.spinner();
                ui.label("Generating...");
            }
        });
    });
    ui.add_space(12.0);

    let Some(outcome) = state.home.generated.as_ref() else {
        return;
    };
    let dataset = &outcome.dataset;

    let mut export = false;
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Preview").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                export = ui.button("Download JSON").clicked();
            });
        });
        render_files(ui, dataset);

        match PreviewTable::from_dataset(dataset) {
            Some(table) => {
                render_table(ui, &table);
                ui.add_space(6.0);
                ui.colored_label(colors::TEXT_SECONDARY, table.note());
            }
            None => {
                ui.colored_label(colors::TEXT_SECONDARY, "The response contained no sample records.");
            }
        }

        ui.add_space(10.0);
        render_charts(ui, &dataset.preview.sample_patients);
    });

    if export {
        state.export_generated();
    }
}

fn render_files(ui: &mut egui::Ui, dataset: &GeneratedDataset) {
    for (label, file) in [
        ("Tabular file", &dataset.tabular_file),
        ("Time-series file", &dataset.timeseries_file),
    ] {
        if let Some(file) = file {
            ui.colored_label(colors::TEXT_SECONDARY, format!("{}: {}", label, file));
        }
    }
}

fn render_table(ui: &mut egui::Ui, table: &PreviewTable) {
    egui::ScrollArea::horizontal().id_salt("preview_table").show(ui, |ui| {
        egui::Grid::new("preview_grid")
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for column in &table.columns {
                    ui.label(egui::RichText::new(column).strong().size(12.0));
                }
                ui.end_row();
                for row in &table.rows {
                    for cell in row {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    });
}

fn render_charts(ui: &mut egui::Ui, patients: &[SamplePatient]) {
    let charted: Vec<_> = patients
        .iter()
        .filter(|patient| !patient.timeseries_sample.is_empty())
        .take(MAX_CHARTS)
        .collect();
    if charted.is_empty() {
        return;
    }

    ui.label(egui::RichText::new("Random blood sugar (mg/dL)").strong());
    ui.horizontal_wrapped(|ui| {
        for (index, patient) in charted.into_iter().enumerate() {
            ui.vertical(|ui| {
                let label = if patient.is_diabetic() { "diabetic" } else { "non-diabetic" };
                ui.colored_label(colors::TEXT_SECONDARY, format!("Patient {} ({})", index + 1, label));
                sparkline(ui, patient);
            });
        }
    });
}

fn sparkline(ui: &mut egui::Ui, patient: &SamplePatient) {
    let series = rbs_series(patient);
    let (response, painter) = ui.allocate_painter(CHART_SIZE, egui::Sense::hover());
    let rect = response.rect;
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(4),
        egui::Stroke::new(1.0, colors::OUTLINE),
        egui::StrokeKind::Inside,
    );

    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));
    let span = if max > min { max - min } else { 1.0 };
    let last = series.len().saturating_sub(1).max(1) as f32;

    let points: Vec<egui::Pos2> = series
        .iter()
        .enumerate()
        .map(|(i, (_, value))| {
            let x = rect.left() + 6.0 + (rect.width() - 12.0) * i as f32 / last;
            let y = rect.bottom() - 6.0 - (rect.height() - 12.0) * ((value - min) / span) as f32;
            egui::pos2(x, y)
        })
        .collect();

    let color = if patient.is_diabetic() {
        colors::SERIES_DIABETIC
    } else {
        colors::SERIES_NON_DIABETIC
    };
    painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));

    if let (Some((first, _)), Some((end, _))) = (series.first(), series.last()) {
        response.on_hover_text(format!(
            "{} to {} · {:.0} to {:.0} mg/dL",
            first, end, min, max
        ));
    }
}

fn render_validation(ui: &mut egui::Ui, state: &AppState) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        let Some(outcome) = state.home.generated.as_ref() else {
            ui.colored_label(colors::TEXT_SECONDARY, "Generate a dataset to see its summary.");
            return;
        };
        let patients = &outcome.dataset.preview.sample_patients;
        let total = patients.len();
        let diabetic = patients.iter().filter(|p| p.is_diabetic()).count();
        let hypertensive = patients.iter().filter(|p| p.has_hypertension()).count();
        let ages: Vec<f64> = patients.iter().filter_map(SamplePatient::age).collect();

        ui.label(egui::RichText::new("Sample summary").strong());
        egui::Grid::new("validation_grid")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                summary_row(ui, "Records generated", outcome.dataset.num_generated.to_string());
                summary_row(ui, "Records previewed", total.to_string());
                summary_row(ui, "Diabetic", share(diabetic, total));
                summary_row(ui, "Hypertension", share(hypertensive, total));
                let mean_age = if ages.is_empty() {
                    "N/A".to_string()
                } else {
                    format!("{:.1}", ages.iter().sum::<f64>() / ages.len() as f64)
                };
                summary_row(ui, "Mean age", mean_age);
            });
    });
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "N/A".to_string();
    }
    format!("{} ({:.0}%)", count, count as f64 * 100.0 / total as f64)
}

fn summary_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.colored_label(colors::TEXT_SECONDARY, label);
    ui.label(value);
    ui.end_row();
}

fn render_training(ui: &mut egui::Ui, state: &mut AppState) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Model training").strong());
        ui.colored_label(
            colors::TEXT_SECONDARY,
            format!(
                "Time series: {} · Tabular: {}",
                state.config.time_series_path(),
                state.config.tabular_path()
            ),
        );
        ui.add(egui::Slider::new(&mut state.home.epochs, EPOCH_RANGE).text("Epochs"));
        ui.add(egui::Slider::new(&mut state.home.batch_size, 1..=256).text("Batch size"));
        ui.add_space(10.0);

        let busy = state.is_training();
        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, styles::primary_button("Train Model")).clicked() {
                state.handle_train();
            }
            if busy {
                ui.spinner();
                ui.label("Training...");
            }
        });

        if let Some(ref training) = state.home.training {
            ui.add_space(10.0);
            egui::Grid::new("training_grid")
                .num_columns(2)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    summary_row(ui, "Final loss", training.final_loss_display());
                    summary_row(ui, "Training time", training.training_time_display());
                });
            if let Some(metrics) = training.metrics_pretty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(metrics).monospace());
            }
        }
    });
}

fn render_about_data(ui: &mut egui::Ui) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("About the data").strong());
        ui.label(
            "Each synthetic patient pairs a tabular record (age, BMI, diabetes and \
             blood-pressure status) with a short series of random blood sugar readings.",
        );
        ui.label(
            "Records are produced by generative models trained on de-identified data, so \
             they follow realistic distributions without describing any real person.",
        );
        ui.label("Use the ratios to control how many generated patients have each condition.");
    });
}
