//! Simulated Backend for Testing
//!
//! This module provides a sensor backend that synthesizes plausible values
//! without real hardware. Output is a pure function of an internal sample
//! counter and the device's working ranges, so a run can be replayed exactly
//! from a known counter start.
//!
//! # Generator
//!
//! For counter value `n` and acceleration range code `r`:
//!
//! ```text
//! scale       = r + 1
//! accel       = ( 1.0 * n / scale, -1.0 * n / scale, 4.0 * n / scale )
//! temperature = 20.0 + sin(0.1 * n)
//! ```
//!
//! Angular speed stays at zero unless enabled with
//! [`SimulatedBackend::with_angular_speed`], in which case it follows the same
//! shape scaled by the angular speed range code `g`:
//!
//! ```text
//! gyro = ( 2.0 * n / (g + 1), -2.0 * n / (g + 1), 0.5 * n / (g + 1) )
//! ```
//!
//! Every call to [`SensorBackend::sample`] advances the counter by exactly one,
//! whatever subset of the values the caller keeps.
//!
//! # Example
//!
//! ```ignore
//! use mpu60x0_logger::backend::SimulatedBackend;
//!
//! let backend = SimulatedBackend::new().with_counter(10);
//! let mut device = Device::new(0x68, Box::new(backend))?;
//! device.read_data()?;
//! ```

use crate::error::Result;
use crate::types::{RangeConfiguration, MPU60X0_DEVICE_ID};

use super::sensor_trait::{BackendKind, BackendStats, RawSample, SensorBackend};

/// Compute the sample for counter value `n`
///
/// This is the whole generator; [`SimulatedBackend`] only adds the counter.
pub fn generate(n: u32, ranges: RangeConfiguration, with_angular_speed: bool) -> RawSample {
    let n = n as f64;
    let scale = (ranges.acceleration.code() + 1) as f64;

    let angular_speed = if with_angular_speed {
        let gyro_scale = (ranges.angular_speed.code() + 1) as f64;
        [
            (2.0 * n / gyro_scale) as f32,
            (-2.0 * n / gyro_scale) as f32,
            (0.5 * n / gyro_scale) as f32,
        ]
    } else {
        [0.0; 3]
    };

    RawSample {
        acceleration: [
            (1.0 * n / scale) as f32,
            (-1.0 * n / scale) as f32,
            (4.0 * n / scale) as f32,
        ],
        angular_speed,
        temperature: (20.0 + (0.1 * n).sin()) as f32,
    }
}

/// Simulated sensor backend
///
/// Each instance owns its own counter; two devices never share one.
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    /// Bus address the backend was attached to
    address: Option<u8>,
    /// Number of samples generated so far (plus the starting offset)
    counter: u32,
    /// Configuration staged by `write_configuration`
    staged: RangeConfiguration,
    /// Whether to synthesize angular speed values
    angular_speed: bool,
    /// Backend statistics
    stats: BackendStats,
}

impl SimulatedBackend {
    /// Create a new simulated backend with the counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the counter at a given value, to replay part of a sequence
    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self
    }

    /// Also synthesize angular speed values
    pub fn with_angular_speed(mut self, enabled: bool) -> Self {
        self.angular_speed = enabled;
        self
    }

    /// Current counter value (the `n` of the next sample)
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Configuration currently staged on the simulated sensor
    pub fn staged(&self) -> RangeConfiguration {
        self.staged
    }

    /// Address the backend is attached to, if any
    pub fn address(&self) -> Option<u8> {
        self.address
    }
}

impl SensorBackend for SimulatedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Simulated
    }

    fn attach(&mut self, address: u8) -> Result<()> {
        self.address = Some(address);
        tracing::debug!("Simulated sensor attached at 0x{:02x}", address);
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(address) = self.address.take() {
            tracing::debug!(
                "Simulated sensor at 0x{:02x} detached after {} samples",
                address,
                self.stats.samples_read
            );
        }
    }

    fn who_am_i(&mut self) -> Result<u8> {
        Ok(MPU60X0_DEVICE_ID)
    }

    fn read_configuration(&mut self) -> Result<RangeConfiguration> {
        self.stats.configuration_reads += 1;
        Ok(self.staged)
    }

    fn write_configuration(&mut self, config: RangeConfiguration) -> Result<()> {
        self.stats.configuration_writes += 1;
        self.staged = config;
        Ok(())
    }

    fn sample(&mut self, ranges: RangeConfiguration) -> Result<RawSample> {
        let sample = generate(self.counter, ranges, self.angular_speed);
        self.counter = self.counter.wrapping_add(1);
        self.stats.samples_read += 1;
        Ok(sample)
    }

    fn stats(&self) -> &BackendStats {
        &self.stats
    }
}
