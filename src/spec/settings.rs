use std::path::Path;

use crate::foundation::error::{VGridError, VGridResult};

/// Key bindings the widget uses.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
pub enum KeyMode {
    Standalone,
    #[default]
    Jupyter,
}

/// Widget settings. Exactly the options the widget recognizes; unknown keys are rejected when
/// read from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VGridSettings {
    pub spinner_dev_mode: bool,
    pub key_mode: KeyMode,
    /// Base URL of the frameserver.
    pub frameserver_endpoint: String,
    /// Base URL the videos are served from.
    pub video_endpoint: String,
    /// Use the frameserver instead of an HTML5 video element for thumbnails.
    pub use_frameserver: bool,
    pub show_timeline: bool,
    /// Number of interval blocks shown per page.
    pub blocks_per_page: u32,
}

impl Default for VGridSettings {
    fn default() -> Self {
        Self {
            spinner_dev_mode: false,
            key_mode: KeyMode::Jupyter,
            frameserver_endpoint: "http://localhost:7500/fetch".to_string(),
            video_endpoint: "http://localhost:8000/".to_string(),
            use_frameserver: false,
            show_timeline: true,
            blocks_per_page: 50,
        }
    }
}

impl VGridSettings {
    pub fn validate(&self) -> VGridResult<()> {
        if self.blocks_per_page == 0 {
            return Err(VGridError::validation("blocks_per_page must be > 0"));
        }
        Ok(())
    }

    /// Load settings from a JSON file; missing keys take their defaults.
    pub fn from_path(path: &Path) -> VGridResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            VGridError::validation(format!("read settings '{}': {e}", path.display()))
        })?;
        let settings: Self = serde_json::from_str(&s).map_err(|e| {
            VGridError::serde(format!("parse settings '{}': {e}", path.display()))
        })?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/settings.rs"]
mod tests;
