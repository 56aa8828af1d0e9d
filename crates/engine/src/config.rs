//! Overlay configuration from environment variables.

use crate::types::DEFAULT_REFRESH_HZ;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    pub refresh_hz: u32,
    pub layout_scale: u16,
    pub log_path: Option<String>,
    /// Start with the HUD disabled.
    pub start_disabled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: DEFAULT_REFRESH_HZ,
            layout_scale: 1,
            log_path: None,
            start_disabled: false,
        }
    }
}

impl OverlayConfig {
    /// Create from environment variables.
    ///
    /// - `FLIGHT_HUD_REFRESH_HZ`: refresh rate (1..=240, default 60)
    /// - `FLIGHT_HUD_SCALE`: layout scale (1..=8, default 1)
    /// - `FLIGHT_HUD_LOG_PATH`: log file
    /// - `FLIGHT_HUD_DISABLED`: `1`/`true` starts with the HUD off
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let refresh_hz = lookup("FLIGHT_HUD_REFRESH_HZ")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|hz| hz.clamp(1, 240))
            .unwrap_or(defaults.refresh_hz);

        let layout_scale = lookup("FLIGHT_HUD_SCALE")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .map(|k| k.clamp(1, 8))
            .unwrap_or(defaults.layout_scale);

        let log_path = lookup("FLIGHT_HUD_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let start_disabled = lookup("FLIGHT_HUD_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            refresh_hz,
            layout_scale,
            log_path,
            start_disabled,
        }
    }
}
