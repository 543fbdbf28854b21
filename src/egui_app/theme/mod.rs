//! Theme Module
//!
//! Colour constants and frame builders shared by the views.
//!
//! # Usage
//!
//! ```rust,ignore
//! use synthesis::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "Hello");
//! });
//! ```

pub mod colors;
pub mod styles;
