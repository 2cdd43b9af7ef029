//! SensorBackend trait for unified backend interface
//!
//! This module provides a common trait for all sensor backends, enabling both
//! real hardware on a register bus and simulated sensors for testing.

use crate::error::Result;
use crate::types::{RangeConfiguration, Vector3};

/// One batch of values produced by a backend in a single transaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
    /// Linear acceleration (x, y, z)
    pub acceleration: Vector3,
    /// Angular speed (x, y, z)
    pub angular_speed: Vector3,
    /// Die temperature
    pub temperature: f32,
}

/// Which kind of backend a device is talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// A sensor on a real register bus
    Hardware,
    /// Deterministic synthetic data
    Simulated,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Hardware => write!(f, "hardware"),
            BackendKind::Simulated => write!(f, "simulated"),
        }
    }
}

/// Statistics for backend transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Number of successful sample transactions
    pub samples_read: u64,
    /// Number of failed sample transactions
    pub failed_reads: u64,
    /// Number of configuration pushes
    pub configuration_writes: u64,
    /// Number of configuration pulls
    pub configuration_reads: u64,
}

impl BackendStats {
    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.samples_read + self.failed_reads;
        if total == 0 {
            100.0
        } else {
            (self.samples_read as f64 / total as f64) * 100.0
        }
    }

    /// Record the outcome of a sample transaction
    pub fn record_sample<T>(&mut self, result: &Result<T>) {
        match result {
            Ok(_) => self.samples_read += 1,
            Err(_) => self.failed_reads += 1,
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Unified interface for sensor backends
///
/// A backend owns everything below the device handle: the bus (or the
/// generator standing in for it) and the configuration staged on the sensor.
/// Implementations must be `Send` so a device can be moved to a worker thread.
///
/// # Example
///
/// ```ignore
/// fn identify(backend: &mut dyn SensorBackend) -> Result<bool> {
///     Ok(backend.who_am_i()? == MPU60X0_DEVICE_ID)
/// }
/// ```
pub trait SensorBackend: Send {
    /// Backend flavour, for diagnostics
    fn kind(&self) -> BackendKind;

    /// Bind the backend to a bus address
    ///
    /// Called exactly once when a device handle is created.
    fn attach(&mut self, address: u8) -> Result<()>;

    /// Release the bus
    fn detach(&mut self) {}

    /// Read the device identifier
    fn who_am_i(&mut self) -> Result<u8>;

    /// Read the working ranges currently staged on the sensor
    fn read_configuration(&mut self) -> Result<RangeConfiguration>;

    /// Stage working ranges on the sensor
    fn write_configuration(&mut self, config: RangeConfiguration) -> Result<()>;

    /// Produce one sample batch
    ///
    /// `ranges` is the device's live configuration at the time of the call.
    fn sample(&mut self, ranges: RangeConfiguration) -> Result<RawSample>;

    /// Get backend statistics
    fn stats(&self) -> &BackendStats;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SensorError;

    #[test]
    fn test_stats_success_rate() {
        let mut stats = BackendStats::default();
        assert_eq!(stats.success_rate(), 100.0);

        stats.record_sample(&Ok(()));
        stats.record_sample(&Ok(()));
        stats.record_sample(&Ok(()));
        stats.record_sample::<()>(&Err(SensorError::Bus {
            address: 0x68,
            message: "nack".to_string(),
        }));

        assert_eq!(stats.samples_read, 3);
        assert_eq!(stats.failed_reads, 1);
        assert_eq!(stats.success_rate(), 75.0);

        stats.reset();
        assert_eq!(stats, BackendStats::default());
    }
}
