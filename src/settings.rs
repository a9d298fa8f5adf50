//! User settings persisted as JSON in the platform config directory.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_ELEMENT_SCALE, DEFAULT_FONT_SIZE, MAX_ELEMENT_SCALE, MAX_FONT_SIZE,
    MIN_ELEMENT_SCALE, MIN_FONT_SIZE, SETTINGS_FILE_NAME, WHEEL_ZOOM_STEP,
};
use crate::persistence::write_atomic;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Global multiplier on element dimensions
    pub element_scale: f32,
    /// Font size given to newly placed elements
    pub default_font_size: f32,
    /// Persist the diagram after every change
    pub autosave: bool,
    /// Zoom change per ctrl/cmd + wheel notch
    pub wheel_zoom_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            element_scale: DEFAULT_ELEMENT_SCALE,
            default_font_size: DEFAULT_FONT_SIZE,
            autosave: true,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
        }
    }
}

/// `<config dir>/erboard/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// Load from the default location, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings.normalized())
    }

    pub fn save(&self) -> Result<()> {
        let path = default_settings_path().context("No config directory on this platform")?;
        self.save_to(&path)
    }

    /// Write atomically so the settings watcher never reads a partial file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        write_atomic(path, json.as_bytes())
    }

    /// Clamp every value into its supported range.
    pub fn normalized(mut self) -> Self {
        self.element_scale = self.element_scale.clamp(MIN_ELEMENT_SCALE, MAX_ELEMENT_SCALE);
        self.default_font_size = self.default_font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if self.wheel_zoom_step.is_nan() || self.wheel_zoom_step <= 0.0 {
            self.wheel_zoom_step = WHEEL_ZOOM_STEP;
        }
        self
    }
}
