// src/config/mod.rs
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub const APP_DIR: &str = "textgrid";
const SETTINGS_FILE: &str = "settings.json";

/// User-facing editor settings. Every field has a default so a partial
/// `settings.json` is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Only meaningful to pixel-based renderers; kept for settings files
    /// shared with them.
    pub font_size: u16,
    pub font_family: String,
    pub font_color: String,
    pub editor_bg_color: String,
    pub sidebar_color: String,
    pub tab_size: usize,
    pub use_spaces_for_tabs: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            font_size: 16,
            font_family: "monospace".to_string(),
            font_color: "#d4d4d4".to_string(),
            editor_bg_color: "#1e1e1e".to_string(),
            sidebar_color: "#252526".to_string(),
            tab_size: 4,
            use_spaces_for_tabs: true,
        }
    }
}

impl EditorSettings {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Invalid settings JSON")
    }

    /// Loads settings from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_settings_path(),
        };

        if !path.exists() {
            tracing::info!("No settings at {}, using defaults", path.display());
            return Ok(EditorSettings::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = Self::from_json(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// What a Tab key press inserts.
    pub fn indent_unit(&self) -> String {
        if self.use_spaces_for_tabs {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }

    pub fn font_color(&self) -> Color {
        parse_color(&self.font_color)
    }

    pub fn editor_bg_color(&self) -> Color {
        parse_color(&self.editor_bg_color)
    }

    pub fn sidebar_color(&self) -> Color {
        parse_color(&self.sidebar_color)
    }
}

/// `~/.config/textgrid` or the platform equivalent.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_DIR)
}

pub fn default_settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}

fn parse_color(value: &str) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        tracing::warn!("Unrecognized color {:?}, using terminal default", value);
        Color::Reset
    })
}
