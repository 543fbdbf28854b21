//! Colour constants
//!
//! Warm amber background with a pink-to-amber accent, matching the
//! Synthesis brand.

use eframe::egui::Color32;

/// Page background - Amber 100
pub const BG_PAGE: Color32 = Color32::from_rgb(0xFE, 0xF3, 0xC7);

/// Header background - Amber 50
pub const HEADER_BG: Color32 = Color32::from_rgb(0xFF, 0xFB, 0xEB);

/// Card surface
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Card border and button outline
pub const OUTLINE: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

/// Primary accent - Pink 500
pub const ACCENT: Color32 = Color32::from_rgb(0xEC, 0x48, 0x99);

/// Secondary accent - Amber 400
pub const ACCENT_WARM: Color32 = Color32::from_rgb(0xFB, 0xBF, 0x24);

/// Active tab - Emerald 500
pub const TAB_ACTIVE: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Muted field background - Gray 100
pub const FIELD_BG: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);

pub const SUCCESS: Color32 = Color32::from_rgb(0x16, 0xA3, 0x4A);

pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

pub const INFO: Color32 = Color32::from_rgb(0x25, 0x63, 0xEB);

/// Sparkline colours by diagnosis
pub const SERIES_DIABETIC: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);
pub const SERIES_NON_DIABETIC: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);
