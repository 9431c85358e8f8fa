//! TOML configuration: storage location, view defaults and appearance.
//!
//! Every section is optional; missing keys fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::FileStorage;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::ui::theme::{parse_hex_color, Theme};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub view: ViewConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the entry file (default: `$XDG_DATA_HOME/workout-tracker`)
    pub data_dir: Option<PathBuf>,
    /// Key the entry list is stored under
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per table page on startup
    pub items_per_page: usize,
    /// Page sizes cycled with `p`
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset: "default", "nord", "gruvbox"
    pub theme: String,
    /// Hex accent override, e.g. "#89b4fa"
    pub accent: Option<String>,
    pub prompt: String,
    pub selected_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            items_per_page: 5,
            page_size_options: vec![5, 10, 20],
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            accent: None,
            prompt: "❯ ".to_string(),
            selected_prefix: "● ".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolved data directory, tilde-expanded
    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => {
                let raw = dir.to_string_lossy();
                PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
            }
            None => FileStorage::default_dir(),
        }
    }

    /// Theme from the configured preset with the accent override applied.
    /// Unknown presets and bad colors fall back with a warning.
    pub fn resolve_theme(&self) -> Theme {
        let mut theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using default", self.appearance.theme);
            Theme::default()
        });

        if let Some(ref accent) = self.appearance.accent {
            match parse_hex_color(accent) {
                Ok(color) => theme.accent = color,
                Err(e) => tracing::warn!("Ignoring accent {:?}: {}", accent, e),
            }
        }

        theme
    }

    /// Page sizes to cycle through, always containing the startup size
    pub fn page_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .view
            .page_size_options
            .iter()
            .copied()
            .filter(|&n| n > 0)
            .collect();
        let startup = self.view.items_per_page;
        if startup > 0 && !sizes.contains(&startup) {
            sizes.push(startup);
        }
        sizes.sort_unstable();
        sizes
    }
}
