//! Error handling for the MPU-60X0 logger
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sensor and sampling operations
#[derive(Error, Debug)]
pub enum SensorError {
    /// The sensor object could not be created for the given address
    #[error("Failed to create sensor object for I2C-device 0x{address:02x}: {reason}")]
    AllocationFailure { address: u8, reason: String },

    /// The device answered with an unexpected identifier
    #[error(
        "Invalid device at address 0x{address:02x}: \
         Device ID was <0x{actual:02x}> but <0x{expected:02x}> was expected"
    )]
    IdentityMismatch { address: u8, expected: u8, actual: u8 },

    /// The output sink could not be opened
    #[error("Failed to open file <{}>: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Errors reported by the register bus
    #[error("Bus error at address 0x{address:02x}: {message}")]
    Bus { address: u8, message: String },

    /// Axis index outside of {0, 1, 2}
    #[error("Invalid axis index: {0}")]
    InvalidAxis(u8),

    /// Working range code outside of 0..=3
    #[error("Invalid {kind} working range code: {code}")]
    InvalidRange { kind: &'static str, code: u8 },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The sampling loop was stopped from outside
    #[error("Sampling cancelled after {completed} samples")]
    Cancelled { completed: u32 },

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SensorError>,
    },
}

impl SensorError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SensorError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root(&self) -> &SensorError {
        match self {
            SensorError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for SensorError {
    fn from(err: serde_json::Error) -> Self {
        SensorError::Serialization(err.to_string())
    }
}

/// Result type alias for sensor operations
pub type Result<T> = std::result::Result<T, SensorError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
