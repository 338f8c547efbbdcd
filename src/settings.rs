//! Player preferences
//!
//! Read once at startup (from the page query string on the web) and never
//! written back.

use crate::tuning::{Tuning, TuningPreset};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Gameplay preset
    pub preset: TuningPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::Classic,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Tuning for the selected preset
    pub fn tuning(&self) -> Tuning {
        self.preset.tuning()
    }

    /// Overlay `key=value` pairs (a URL query string, with or without the
    /// leading `?`). Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "preset" => match TuningPreset::parse(value) {
                    Some(preset) => settings.preset = preset,
                    None => log::warn!("Unknown preset '{}', keeping {}", value, settings.preset.as_str()),
                },
                "muted" | "mute" => settings.muted = matches!(value, "" | "1" | "true" | "yes"),
                "volume" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.master_volume = v.clamp(0.0, 1.0);
                    }
                }
                "sfx" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.sfx_volume = v.clamp(0.0, 1.0);
                    }
                }
                "music" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.music_volume = v.clamp(0.0, 1.0);
                    }
                }
                _ => {}
            }
        }
        settings
    }

    /// Settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Using {} preset", settings.preset.as_str());
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
