//! Shared Module
//!
//! Types that do not depend on the UI: the JSON bodies exchanged with the
//! Synthesis API, the error taxonomy, and configuration. Everything here
//! is plain serde data and can be reused by a headless client.

/// Auth endpoint types and the bearer token
pub mod api;

/// Healthcare GAN generate/train types
pub mod dataset;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use api::{AuthPayload, BearerToken, ProfileUpdate, SignInRequest, SignUpRequest, UserProfile};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use dataset::{GenerateRequest, GeneratedDataset, SamplePatient, TrainRequest, TrainingResult};
pub use error::{ApiError, ErrorKind, ValidationError};
