//! Home workspace state
//!
//! Generation and training parameters, the last results, and the view
//! models the Home screen draws from them.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::egui_app::config::Config;
use crate::shared::dataset::{
    GenerateOutcome, GenerateRequest, GeneratedDataset, SamplePatient, ServiceHealth, TrainRequest,
    TrainingResult,
};

pub const RECORD_COUNT_RANGE: std::ops::RangeInclusive<u32> = 10..=1000;
pub const RECORD_COUNT_STEP: u32 = 10;
pub const EPOCH_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;
pub const RATIO_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTab {
    Generate,
    Validation,
    Training,
    About,
}

impl HomeTab {
    pub const ALL: [HomeTab; 4] = [HomeTab::Generate, HomeTab::Validation, HomeTab::Training, HomeTab::About];

    pub fn label(self) -> &'static str {
        match self {
            HomeTab::Generate => "Generate data",
            HomeTab::Validation => "Validation",
            HomeTab::Training => "Training",
            HomeTab::About => "About Data",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomeState {
    pub active_tab: HomeTab,
    pub record_count: u32,
    pub diabetes_ratio: f64,
    pub hypertension_ratio: f64,
    pub epochs: u32,
    pub batch_size: u32,
    pub generated: Option<GenerateOutcome>,
    pub training: Option<TrainingResult>,
    pub health: Option<ServiceHealth>,
    /// Inline banner for the last failed request
    pub error: Option<String>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            active_tab: HomeTab::Generate,
            record_count: 1000,
            diabetes_ratio: 0.5,
            hypertension_ratio: 0.7,
            epochs: 100,
            batch_size: 32,
            generated: None,
            training: None,
            health: None,
            error: None,
        }
    }
}

fn snap_ratio(value: f64) -> f64 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped / RATIO_STEP).round() * RATIO_STEP
}

impl HomeState {
    pub fn generate_request(&self) -> GenerateRequest {
        let count = self
            .record_count
            .clamp(*RECORD_COUNT_RANGE.start(), *RECORD_COUNT_RANGE.end());
        GenerateRequest {
            num_samples: count - count % RECORD_COUNT_STEP,
            diabetes_ratio: snap_ratio(self.diabetes_ratio),
            hypertension_ratio: snap_ratio(self.hypertension_ratio),
        }
    }

    pub fn train_request(&self, config: &Config) -> TrainRequest {
        TrainRequest {
            time_series_path: config.time_series_path().to_string(),
            tabular_path: config.tabular_path().to_string(),
            epochs: self.epochs.clamp(*EPOCH_RANGE.start(), *EPOCH_RANGE.end()),
        }
    }

    /// Drop results from a previous session
    pub fn clear_results(&mut self) {
        self.generated = None;
        self.training = None;
        self.error = None;
    }
}

/// Tabular preview of the sample patients
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_generated: u64,
}

impl PreviewTable {
    /// `None` when the response carries no sample patients.
    pub fn from_dataset(dataset: &GeneratedDataset) -> Option<Self> {
        let patients = &dataset.preview.sample_patients;
        let first = patients.first()?;
        // Columns follow the key order of the server payload.
        let keys: Vec<String> = first.tabular_data.keys().cloned().collect();

        let rows = patients
            .iter()
            .map(|patient| {
                keys.iter()
                    .map(|key| format_cell(key, patient.tabular_data.get(key)))
                    .collect()
            })
            .collect();

        Some(Self {
            columns: keys.iter().map(|key| column_title(key)).collect(),
            rows,
            total_generated: dataset.num_generated,
        })
    }

    pub fn note(&self) -> String {
        format!(
            "Showing {} sample records out of {} total generated records.",
            self.rows.len(),
            self.total_generated
        )
    }
}

pub fn column_title(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

pub fn format_cell(key: &str, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::Number(n)) if matches!(key, "diabetes" | "bp_status") => {
            let flag = if n.as_f64() == Some(1.0) { "Yes" } else { "No" };
            flag.to_string()
        }
        Some(Value::Number(n)) if n.is_f64() => format!("{:.2}", n.as_f64().unwrap_or_default()),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// (HH:MM, mg/dL) points for a patient's glucose chart
pub fn rbs_series(patient: &SamplePatient) -> Vec<(String, f64)> {
    patient
        .timeseries_sample
        .iter()
        .map(|point| (point.time_label(), point.rbs_value))
        .collect()
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("healthcare_data_{}.json", date.format("%Y-%m-%d"))
}

/// Write the raw generate response as pretty JSON into `dir`.
pub fn export_dataset(raw: &Value, dir: &Path, date: NaiveDate) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    let text = serde_json::to_string_pretty(raw).map_err(std::io::Error::other)?;
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Downloads folder, falling back to the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
