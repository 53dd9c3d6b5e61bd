use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::platform::settings_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Overrides the notes file location
    #[serde(default)]
    pub notes_file: Option<PathBuf>,

    /// Shown when a note's content cannot be decoded (new notes included)
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,

    #[serde(default)]
    pub pretty_json: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_placeholder_text() -> String {
    "This is a new note".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notes_file: None,
            placeholder_text: default_placeholder_text(),
            pretty_json: false,
            log_level: default_log_level(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists.
    ///
    /// A file that exists but cannot be read or parsed is an error and is
    /// left alone; the caller decides whether to carry on with defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        match fs::read_to_string(config_path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Settings(format!("cannot parse {}: {}", config_path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let default = Self::default();
                // Try to save defaults for next time
                if let Err(e) = default.save_to(config_path) {
                    log::debug!("Could not write default settings: {}", e);
                }
                Ok(default)
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(AppError::Settings(format!("unknown log level '{}'", other))),
        }
    }
}
