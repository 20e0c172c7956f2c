use std::env;

use serde::{Deserialize, Serialize};

fn default_dismiss_after_ms() -> u64 {
    15000
}

fn default_width() -> f64 {
    350.0
}

fn default_height() -> f64 {
    400.0
}

fn default_margin() -> f64 {
    20.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Auto-close delay after a result or error is rendered
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
    /// Fallback surface size when the host cannot measure the popup
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Distance from the top-right corner on first placement
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
        }
    }
}

impl PopupConfig {
    pub fn new() -> Self {
        let dismiss_after_ms = env::var("TARGUM_DISMISS_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_dismiss_after_ms);

        Self {
            dismiss_after_ms,
            ..Self::default()
        }
    }
}
