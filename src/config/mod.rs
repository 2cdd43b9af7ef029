//! Configuration module for the logger
//!
//! Settings are read from a TOML file. Every field has a default, so a missing
//! file or a partial file is fine. Command-line options are applied on top.
//!
//! # Config Location
//!
//! - `--config <path>` when given
//! - otherwise `<config_dir>/mpu60x0-logger/config.toml` if it exists
//! - otherwise built-in defaults
//!
//! # Example
//!
//! ```toml
//! [sensor]
//! address_bit = true
//! acceleration_range = 1  # ±4g, range codes 0..=3
//!
//! [sampling]
//! sample_count = 10
//! delay_us = 0
//!
//! [output]
//! format = "json"
//! ```

use crate::error::{Result, SensorError};
use crate::session::{OutputTarget, PipelineSettings, RecordFormat};
use crate::types::{
    default_address, AccelerationRange, AngularSpeedRange, RangeConfiguration, MPU60X0_DEVICE_ID,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for the config directory
pub const APP_ID: &str = "mpu60x0-logger";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default number of samples per session
pub const DEFAULT_SAMPLE_COUNT: u32 = 100;

/// Default delay between samples in microseconds
pub const DEFAULT_DELAY_US: u64 = 100_000;

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

// ==================== Sections ====================

/// Which sensor to talk to and how to configure it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SensorSection {
    /// Set the address-select bit (0x68 -> 0x6A)
    #[serde(default)]
    pub address_bit: bool,

    /// Explicit address, wins over `address_bit`
    #[serde(default)]
    pub address: Option<u8>,

    #[serde(default)]
    pub acceleration_range: AccelerationRange,

    #[serde(default)]
    pub angular_speed_range: AngularSpeedRange,
}

/// How many samples and how fast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingSection {
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,

    /// Delay after each sample in microseconds
    #[serde(default = "default_delay_us")]
    pub delay_us: u64,
}

fn default_sample_count() -> u32 {
    DEFAULT_SAMPLE_COUNT
}

fn default_delay_us() -> u64 {
    DEFAULT_DELAY_US
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            delay_us: DEFAULT_DELAY_US,
        }
    }
}

/// Where records go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputSection {
    /// Output file; stdout when absent
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: RecordFormat,
}

/// Synthetic backend knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SimulationSection {
    /// First counter value
    #[serde(default)]
    pub counter_start: u32,

    /// Also synthesize angular speed
    #[serde(default)]
    pub angular_speed: bool,
}

/// Diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingSection {
    #[serde(default)]
    pub verbose: bool,

    /// Also write diagnostics to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

// ==================== Logger Config ====================

/// Complete logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggerConfig {
    #[serde(default)]
    pub sensor: SensorSection,

    #[serde(default)]
    pub sampling: SamplingSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl LoggerConfig {
    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SensorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml(&content).map_err(|e| {
            SensorError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path` if given, else from the default location if present
    ///
    /// An explicitly given path must exist. The default location is optional.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Using config file {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SensorError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SensorError::Serialization(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| {
            SensorError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Bus address to use: the explicit one, else derived from the select bit
    pub fn effective_address(&self) -> u8 {
        self.sensor
            .address
            .unwrap_or_else(|| default_address(self.sensor.address_bit))
    }

    pub fn ranges(&self) -> RangeConfiguration {
        RangeConfiguration::new(
            self.sensor.acceleration_range,
            self.sensor.angular_speed_range,
        )
    }

    pub fn delay(&self) -> Duration {
        Duration::from_micros(self.sampling.delay_us)
    }

    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::from_path(self.output.path.as_deref())
    }

    /// Settings for one pipeline run
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            address: self.effective_address(),
            sample_count: self.sampling.sample_count,
            delay: self.delay(),
            expected_id: MPU60X0_DEVICE_ID,
            ranges: self.ranges(),
        }
    }
}
