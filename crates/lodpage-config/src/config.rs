//! Build settings with calibrated defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "lodpage";
const SETTINGS_FILE: &str = "settings.ron";

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Heuristics controlling range splits and containment.
    pub paging: PagingSettings,
    /// Source tile discovery.
    pub input: InputSettings,
    /// Output naming.
    pub output: OutputSettings,
    /// Logging.
    pub log: LogSettings,
}

/// Heuristics for building the paging tree.
///
/// Both values were calibrated on photogrammetry tiles and may need
/// retuning for other datasets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PagingSettings {
    /// Multiplier applied to a tile's own radius to get the distance at
    /// which it switches to its finer children.
    pub dilation_factor: f64,
    /// Fraction of a child's radius allowed to protrude outside its parent
    /// while still counting as contained.
    pub containment_slack: f64,
}

/// Source tile discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    /// Extension of source tiles, without the dot. Matched case-sensitively.
    pub source_ext: String,
}

/// Output naming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    /// Extension of written tiles, including the dot.
    pub output_ext: String,
    /// Stem of the root tile written directly under the output directory.
    pub root_name: String,
    /// Subdirectory of the output directory holding per-level tiles.
    pub level_dir: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Log filter (e.g., "info", "debug,lodpage_build=trace").
    pub level: String,
    /// Optional JSON log file.
    pub file: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            dilation_factor: 1.5,
            containment_slack: 0.5,
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            source_ext: "obj".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_ext: ".ive".to_string(),
            root_name: "out".to_string(),
            level_dir: "ive".to_string(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl OutputSettings {
    /// File name of the root tile: `<root_name><output_ext>`.
    pub fn root_file_name(&self) -> String {
        format!("{}{}", self.root_name, self.output_ext)
    }
}

// --- Load / Save ---

impl Settings {
    /// Default settings location in the platform configuration directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_NAME).join(SETTINGS_FILE))
    }

    /// Load settings from `path`, or fall back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
