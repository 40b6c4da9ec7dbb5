//! Grid dimensions and the pixel layout the presentation layer draws with.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 50;
pub const DEFAULT_TILE_SIZE: f32 = 62.0;
pub const DEFAULT_OFFSET: f32 = 7.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            offset_x: DEFAULT_OFFSET,
            offset_y: DEFAULT_OFFSET,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map config I/O error: {e}"),
            Self::Parse(e) => write!(f, "map config is not valid TOML: {e}"),
            Self::Invalid(message) => write!(f, "invalid map config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl MapConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tile size must be positive, got {}",
                self.tile_size
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(ConfigError::Invalid("tile offset must be finite".to_string()));
        }
        Ok(())
    }
}
