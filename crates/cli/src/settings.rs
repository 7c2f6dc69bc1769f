// Chunk: docs/chunks/cli - Line-oriented command-line front end

//! User settings persisted as JSON.
//!
//! Stored in `<config_dir>/gapline/settings.json` unless `--config` names
//! another file. Every field is optional; missing fields take defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use gapline_buffer::{EolMode, SessionOptions, DEFAULT_CAPACITY, DEFAULT_TAB_WIDTH};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "gapline";
const SETTINGS_FILE: &str = "settings.json";

/// Line ending for documents that do not contain one yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolSetting {
    #[default]
    Lf,
    Crlf,
}

impl From<EolSetting> for EolMode {
    fn from(setting: EolSetting) -> Self {
        match setting {
            EolSetting::Lf => EolMode::Lf,
            EolSetting::Crlf => EolMode::CrLf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spaces inserted by a tab.
    pub tab_width: usize,
    /// Initial gap buffer capacity in characters.
    pub initial_capacity: usize,
    /// How long killing a run waits for its output reader.
    pub kill_timeout_ms: u64,
    pub default_eol: EolSetting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            initial_capacity: DEFAULT_CAPACITY,
            kill_timeout_ms: 1000,
            default_eol: EolSetting::Lf,
        }
    }
}

impl Settings {
    /// `<config_dir>/gapline/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from `explicit` or the default location.
    ///
    /// A missing default file yields defaults; a missing explicit file, or
    /// any file that fails to parse, is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let Some(path) = Self::default_path() else {
            tracing::debug!("No config directory available, using default settings");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!("Settings not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings at {}", path.display()))?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Writes settings as pretty JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    fn sanitized(mut self) -> Self {
        if self.tab_width == 0 {
            tracing::warn!("tab_width 0 is not usable; using {}", DEFAULT_TAB_WIDTH);
            self.tab_width = DEFAULT_TAB_WIDTH;
        }
        self
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            tab_width: self.tab_width,
            initial_capacity: self.initial_capacity,
        }
    }

    pub fn kill_timeout(&self) -> Duration {
        Duration::from_millis(self.kill_timeout_ms)
    }
}
