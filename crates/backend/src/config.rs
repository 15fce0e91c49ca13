//! Backend configuration.

use std::env;

use crate::term::ColorMode;
use crate::types::{DEFAULT_RESX, DEFAULT_RESY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendConfig {
    /// Framebuffer width in pixels.
    pub width: u16,
    /// Framebuffer height in pixels.
    pub height: u16,
    pub color_mode: ColorMode,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_RESX,
            height: DEFAULT_RESY,
            color_mode: ColorMode::Persistent,
        }
    }
}

impl BackendConfig {
    /// Read `DG_TTY_WIDTH`, `DG_TTY_HEIGHT` and `DG_TTY_COLOR_MODE`.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("DG_TTY_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&w: &u16| w > 0)
            .unwrap_or(defaults.width);

        let height = lookup("DG_TTY_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&h: &u16| h > 0)
            .unwrap_or(defaults.height);

        let color_mode = lookup("DG_TTY_COLOR_MODE")
            .and_then(|s| parse_color_mode(&s))
            .unwrap_or(defaults.color_mode);

        Self {
            width,
            height,
            color_mode,
        }
    }
}

/// `persistent` or `per-frame` (case-insensitive).
pub fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "persistent" => Some(ColorMode::Persistent),
        "per-frame" | "per_frame" | "perframe" => Some(ColorMode::PerFrame),
        _ => None,
    }
}
