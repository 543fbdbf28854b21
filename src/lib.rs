//! Synthesis - Main Library
//!
//! Desktop client for the Synthesis synthetic healthcare data service. Users
//! create an account, sign in, and generate or train on synthetic patient
//! records through the backend's REST API.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, the error taxonomy and layered configuration
//!   - Auth payloads and the user profile
//!   - Dataset generation and training payloads
//!   - `ApiError` / `ValidationError`
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - API client and session persistence
//!   - Form validation and routing with a session guard
//!   - Views for landing, auth, profile and the data workspace
//!
//! # Usage
//!
//! ```rust,no_run
//! use synthesis::egui_app::AppState;
//!
//! let mut state = AppState::new().expect("tokio runtime");
//! state.update();
//! ```
//!
//! # Threading
//!
//! egui renders on the main thread. Network calls run on a small tokio
//! runtime owned by the app state and are polled once per frame.

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
