//! Demo configuration
//!
//! Optional TOML configuration for the spinning-cube demo. Missing files
//! and unreadable values fall back to the built-in defaults so the demo
//! always runs; a present-but-invalid configuration is reported.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values are out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for one demo run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of frames to drive
    pub frames: u64,

    /// Radians added to the cube's rotation each tick
    pub angle_increment: f32,

    /// RGBA colour bound for the cube
    pub colour: [f32; 4],

    /// Viewport width in pixels
    pub viewport_width: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 100,
            angle_increment: 0.01,
            colour: [0.0, 0.0, 1.0, 1.0],
            viewport_width: 800,
            viewport_height: 600,
        }
    }
}

impl DemoConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                log::warn!("ignoring config at {}: {error}", path.display());
                Self::default()
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames == 0 {
            return Err(ConfigError::Invalid("frames must be positive".to_string()));
        }
        if !self.angle_increment.is_finite() {
            return Err(ConfigError::Invalid(
                "angle_increment must be finite".to_string(),
            ));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::Invalid(
                "viewport dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frames, 100);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: DemoConfig = toml::from_str("frames = 10").unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.angle_increment, 0.01);
    }

    #[test]
    fn test_zero_frames_rejected() {
        let config: DemoConfig = toml::from_str("frames = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
