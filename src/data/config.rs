use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CONFIG_FILENAME: &str = "chartpack.toml";

/// Configuration for chartpack, contained in a chartpack.toml file.
///
/// Every field has a default, so an empty file is a valid config. Options
/// given on the command line take precedence over values from this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The tallest that a packed layout is allowed to be, in sheet widths.
    #[serde(default = "default_target_height")]
    pub target_height: f64,

    /// The minimum gap to keep between islands, and between islands and the
    /// top and bottom of the sheet.
    #[serde(default)]
    pub padding: f64,

    /// What to do when the islands don't fit within the target height.
    #[serde(default)]
    pub grow: GrowConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    /// The path that this config came from, if it was read from a file.
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_height: default_target_height(),
            padding: 0.0,
            grow: GrowConfig::default(),
            preview: PreviewConfig::default(),
            file_path: None,
        }
    }
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path)?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = Some(path.to_owned());

        log::debug!("Read config from {}", path.display());

        Ok(config)
    }

    /// Reads the config from the given file or folder. With no path, looks in
    /// `folder` and falls back to the default config if there is no config
    /// file there.
    pub fn locate(path: Option<&Path>, folder: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read_from_folder_or_file(path),
            None => match Self::read_from_folder(folder) {
                Ok(config) => Ok(config),
                Err(err) if err.is_not_found() => {
                    log::debug!("No {} found, using default config", CONFIG_FILENAME);
                    Ok(Self::default())
                }
                Err(err) => Err(err),
            },
        }
    }
}

fn default_target_height() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GrowConfig {
    /// How many times to retry with a taller target height. Zero means a
    /// layout that doesn't fit is an error.
    pub attempts: u32,

    /// How much to multiply the target height by on each retry.
    pub factor: f64,
}

impl Default for GrowConfig {
    fn default() -> Self {
        Self {
            attempts: 0,
            factor: 1.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PreviewConfig {
    /// The width of preview images in pixels. Their height follows from the
    /// layout being drawn.
    pub width: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { width: 512 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} in {}", .source, .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
