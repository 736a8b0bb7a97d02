//! Host settings, stored as `config.json`.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smooth_scroll::codec::{PACKET_SIZE, encode_config};

use crate::error::HostError;

/// Name of the directory holding the settings file, under the platform's application support directory
pub const CONFIG_DIR_NAME: &str = "SmoothScrollDaemon";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings of the host daemon.
///
/// Missing keys in the json file take their default value. Values are always passed through
/// [`HostConfig::sanitized`] when loaded or saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    /// Step pushed to the device on attach
    pub host_step_pixels: u8,
    /// Repeat interval pushed to the device on attach, also the frame period of the engine
    pub host_interval_ms: u8,
    /// Fraction of the accumulated delta released per frame
    pub damping: f64,
    /// Largest movement of a single frame
    pub max_step_per_frame: f64,
    /// Smallest movement of a single frame
    pub minimum_output_magnitude: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host_step_pixels: 3,
            host_interval_ms: 5,
            damping: 0.28,
            max_step_per_frame: 6.0,
            minimum_output_magnitude: 0.4,
        }
    }
}

impl HostConfig {
    /// Clamp every field into its valid range.
    ///
    /// A frame can always carry at least one full device step. NaN falls back to the lower bound.
    pub fn sanitized(self) -> Self {
        let host_step_pixels = self.host_step_pixels.max(1);
        Self {
            host_step_pixels,
            host_interval_ms: self.host_interval_ms.max(1),
            damping: self.damping.max(0.01).min(1.0),
            max_step_per_frame: self.max_step_per_frame.max(host_step_pixels as f64).max(1.0),
            minimum_output_magnitude: self.minimum_output_magnitude.max(0.1),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string_pretty(&self.sanitized())?)
    }

    pub fn load(path: &Path) -> Result<Self, HostError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load the settings, any failure falls back to the defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load {} ({}). Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the sanitized settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), HostError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Config packet pushed to the device when it's attached
    pub fn config_packet(&self) -> [u8; PACKET_SIZE] {
        encode_config(self.host_step_pixels, self.host_interval_ms)
    }
}

/// Location of the settings file under `base_dir`
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod test {
    use smooth_scroll::codec::{ConfigMessage, decode};

    use super::*;

    #[ctor::ctor]
    fn init_log() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    #[test]
    fn test_sanitized_clamps_every_field() {
        let config = HostConfig {
            host_step_pixels: 0,
            host_interval_ms: 0,
            damping: 5.0,
            max_step_per_frame: 0.5,
            minimum_output_magnitude: 0.0,
        }
        .sanitized();
        assert_eq!(config.host_step_pixels, 1);
        assert_eq!(config.host_interval_ms, 1);
        assert_eq!(config.damping, 1.0);
        assert_eq!(config.max_step_per_frame, 1.0);
        assert_eq!(config.minimum_output_magnitude, 0.1);

        let config = HostConfig {
            damping: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.damping, 0.01);
    }

    #[test]
    fn test_sanitized_max_step_covers_device_step() {
        let config = HostConfig {
            host_step_pixels: 10,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.max_step_per_frame, 10.0);
        assert_eq!(HostConfig::default().sanitized(), HostConfig::default());
    }

    #[test]
    fn test_sanitized_nan() {
        let config = HostConfig {
            damping: f64::NAN,
            minimum_output_magnitude: f64::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.damping, 0.01);
        assert_eq!(config.minimum_output_magnitude, 0.1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = HostConfig::from_json(r#"{ "hostStepPixels": 8, "damping": 0.5 }"#).unwrap();
        assert_eq!(config.host_step_pixels, 8);
        assert_eq!(config.host_interval_ms, 5);
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.max_step_per_frame, 8.0);

        assert!(HostConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(dir.path());
        // Missing file
        assert_eq!(HostConfig::load_or_default(&path), HostConfig::default());

        // Broken file
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ \"damping\": \"high\" }").unwrap();
        assert!(HostConfig::load(&path).is_err());
        assert_eq!(HostConfig::load_or_default(&path), HostConfig::default());
    }

    #[test]
    fn test_save_writes_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_path(dir.path());
        let config = HostConfig {
            host_interval_ms: 0,
            damping: 0.4,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = HostConfig::load(&path).unwrap();
        assert_eq!(loaded.host_interval_ms, 1);
        assert_eq!(loaded.damping, 0.4);
        assert!(fs::read_to_string(&path).unwrap().contains("\"hostIntervalMs\""));
    }

    #[test]
    fn test_config_packet() {
        let config = HostConfig {
            host_step_pixels: 12,
            host_interval_ms: 7,
            ..Default::default()
        };
        let packet = config.config_packet();
        assert_eq!(decode(&packet), Some(ConfigMessage { step: 12, interval: 7 }));
    }
}
