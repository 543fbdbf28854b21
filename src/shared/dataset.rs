//! Healthcare GAN wire types
//!
//! Generated datasets and training results are display-only. The client
//! checks that the pieces it renders are present and leaves everything else
//! as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/healthcare-gan/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub num_samples: u32,
    pub diabetes_ratio: f64,
    pub hypertension_ratio: f64,
}

/// Body of `POST /api/healthcare-gan/train`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRequest {
    pub time_series_path: String,
    pub tabular_path: String,
    pub epochs: u32,
}

/// One reading from a patient's glucose time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: String,
    pub rbs_value: f64,
}

impl TimeSeriesPoint {
    /// `HH:MM` portion of an ISO timestamp, or the raw value.
    pub fn time_label(&self) -> String {
        match self.timestamp.split_once('T') {
            Some((_, time)) => time.chars().take(5).collect(),
            None => self.timestamp.clone(),
        }
    }
}

/// A sample patient from the generation preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePatient {
    #[serde(default)]
    pub tabular_data: Map<String, Value>,
    #[serde(default)]
    pub timeseries_sample: Vec<TimeSeriesPoint>,
}

impl SamplePatient {
    fn flag(&self, key: &str) -> bool {
        self.tabular_data.get(key).and_then(Value::as_f64) == Some(1.0)
    }

    pub fn is_diabetic(&self) -> bool {
        self.flag("diabetes")
    }

    pub fn has_hypertension(&self) -> bool {
        self.flag("bp_status")
    }

    pub fn age(&self) -> Option<f64> {
        self.tabular_data.get("age").and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    #[serde(default, alias = "samples")]
    pub sample_patients: Vec<SamplePatient>,
}

/// `data` of a successful generate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDataset {
    #[serde(default)]
    pub preview: DatasetPreview,
    pub num_generated: u64,
    #[serde(default)]
    pub tabular_file: Option<String>,
    #[serde(default)]
    pub timeseries_file: Option<String>,
}

/// Full generate response, kept so it can be exported verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOutcome {
    pub dataset: GeneratedDataset,
    pub raw: Value,
}

/// Response of `POST /api/healthcare-gan/train`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    #[serde(default)]
    pub final_loss: Option<Value>,
    #[serde(default)]
    pub training_time: Option<Value>,
    #[serde(default)]
    pub metrics: Option<Value>,
}

impl TrainingResult {
    pub fn final_loss_display(&self) -> String {
        display_scalar(self.final_loss.as_ref())
    }

    pub fn training_time_display(&self) -> String {
        match self.training_time.as_ref() {
            None | Some(Value::Null) => "N/A".to_string(),
            value => format!("{}s", display_scalar(value)),
        }
    }

    pub fn metrics_pretty(&self) -> Option<String> {
        self.metrics
            .as_ref()
            .filter(|m| !m.is_null())
            .and_then(|m| serde_json::to_string_pretty(m).ok())
    }
}

fn display_scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.4}", f),
            _ => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Response of `GET /api/healthcare-gan/health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub models_loaded: Option<bool>,
    #[serde(default)]
    pub device: Option<String>,
}
