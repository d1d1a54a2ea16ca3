/// Input surface configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the config inside the config directory.
const CONFIG_FILE_NAME: &str = "editlog.json";

/// Characters whose handling is controlled by the `allow_*` flags rather
/// than by `disallowed_chars`.
const FLAG_GOVERNED_CHARS: [char; 3] = ['\n', '\r', '\t'];

/// Configuration for a single text-input surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum buffer length in chars. 0 = unlimited.
    pub max_length: usize,
    /// Maximum undo entries kept. 0 = unbounded.
    pub max_history_depth: usize,
    /// Whether losing focus clears the undo and redo logs.
    pub clear_history_on_blur: bool,
    pub allow_newlines: bool,
    pub allow_tabs: bool,
    /// Extra characters stripped from any inserted text.
    pub disallowed_chars: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_length: 0,
            max_history_depth: 0,
            clear_history_on_blur: true,
            allow_newlines: false,
            allow_tabs: false,
            disallowed_chars: String::new(),
        }
    }
}

impl InputConfig {
    /// Returns the config file path: user config dir + `editlog/editlog.json`.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("editlog").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<InputConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Removes duplicate and flag-governed characters from `disallowed_chars`.
    pub fn sanitize(&mut self) {
        let mut seen = Vec::new();
        for c in self.disallowed_chars.chars() {
            if !FLAG_GOVERNED_CHARS.contains(&c) && !seen.contains(&c) {
                seen.push(c);
            }
        }
        self.disallowed_chars = seen.into_iter().collect();
    }

    /// Returns the length cap, or `None` when unlimited.
    pub fn length_limit(&self) -> Option<usize> {
        (self.max_length > 0).then_some(self.max_length)
    }
}
