//! egui Native Desktop App Module
//!
//! The Synthesis desktop client, talking to the backend at
//! `http://localhost:5000` unless configured otherwise.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs          - Module exports
//! ├── main.rs         - Binary entry point
//! ├── config.rs       - Environment / file configuration
//! ├── api_client.rs   - REST client and response envelope
//! ├── session.rs      - Persisted token + user record
//! ├── validators.rs   - Field validators
//! ├── forms.rs        - Sign-in, sign-up and profile forms
//! ├── router.rs       - Routes and the session guard
//! ├── auth.rs         - Session lifecycle state machine
//! ├── tasks.rs        - Background requests
//! ├── toast.rs        - Transient notifications
//! ├── home.rs         - Data workspace state
//! ├── state/          - Application state and handlers
//! ├── theme/          - Colors and frames
//! └── views/          - One module per screen
//! ```

pub mod api_client;
pub mod auth;
pub mod config;
pub mod forms;
pub mod home;
pub mod router;
pub mod session;
pub mod state;
pub mod tasks;
pub mod theme;
pub mod toast;
pub mod validators;
pub mod views;

// Re-export commonly used types
pub use api_client::{ApiClient, ApiResponse};
pub use auth::{AuthPhase, AuthState};
pub use config::Config;
pub use router::{Resolution, Route, RouteGuard, Router};
pub use session::{FileStorage, KeyValueStorage, MemoryStorage, Session, SessionStore};
pub use state::AppState;
