//! Device handle for an MPU-60X0 sensor
//!
//! A [`Device`] tracks the bus address, the live working ranges and the last
//! values read from the sensor. Every bus transaction goes through the
//! [`SensorBackend`] the device was created with.
//!
//! # Accessors vs. reads
//!
//! - `get_*` methods only look at the cached snapshot and never touch the backend.
//! - `read_*` methods run one backend sample transaction and copy the relevant
//!   values into the snapshot. With the simulated backend every read advances
//!   the sample counter by one, so `read_acceleration` followed by
//!   `read_angular_speed` sees two different ticks while `read_data` sees one.
//!
//! # Configuration
//!
//! The live ranges (`set_*_working_range`) are separate from the ranges staged
//! in the backend. [`Device::write_configuration`] pushes live → staged and
//! [`Device::read_configuration`] pulls staged → live.
//!
//! # Example
//!
//! ```ignore
//! use mpu60x0_logger::{backend::SimulatedBackend, device::Device, types::Axis};
//!
//! let mut device = Device::new(0x68, Box::new(SimulatedBackend::new()))?;
//! assert_eq!(device.identify()?, 0x68);
//!
//! device.read_data()?;
//! let x = device.get_acceleration_axis(Axis::X);
//! ```

use crate::backend::{BackendKind, BackendStats, RawSample, SensorBackend};
use crate::error::Result;
use crate::types::{AccelerationRange, AngularSpeedRange, Axis, RangeConfiguration, Vector3};

/// Handle for one physical or simulated sensor
pub struct Device {
    /// Bus address, fixed at creation
    address: u8,
    /// Live working ranges
    acceleration_range: AccelerationRange,
    angular_speed_range: AngularSpeedRange,
    /// Snapshot of the last reads
    acceleration: Vector3,
    angular_speed: Vector3,
    temperature: f32,
    /// Backend doing the actual transactions
    backend: Box<dyn SensorBackend>,
}

impl Device {
    /// Create a handle for the sensor at `address`
    ///
    /// Ranges default to ±2g / ±250°/s and the snapshot is zeroed. Fails with
    /// [`SensorError::AllocationFailure`](crate::error::SensorError::AllocationFailure)
    /// when the backend cannot be bound to the address.
    pub fn new(address: u8, mut backend: Box<dyn SensorBackend>) -> Result<Self> {
        backend.attach(address)?;
        tracing::debug!(
            "Created {} sensor object for 0x{:02x}",
            backend.kind(),
            address
        );

        Ok(Self {
            address,
            acceleration_range: AccelerationRange::default(),
            angular_speed_range: AngularSpeedRange::default(),
            acceleration: [0.0; 3],
            angular_speed: [0.0; 3],
            temperature: 0.0,
            backend,
        })
    }

    /// Release the handle and its backend
    ///
    /// Dropping the handle does the same; this just makes the end of a
    /// session explicit. Ownership rules out a second release.
    pub fn close(self) {
        drop(self);
    }

    /// Bus address of the sensor
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Kind of backend behind this handle
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Backend transaction statistics
    pub fn backend_stats(&self) -> &BackendStats {
        self.backend.stats()
    }

    /// Read the device identifier reported by the backend
    pub fn identify(&mut self) -> Result<u8> {
        self.backend.who_am_i()
    }

    // ==================== Snapshot accessors ====================

    /// Last read acceleration on one axis
    pub fn get_acceleration_axis(&self, axis: Axis) -> f32 {
        self.acceleration[axis.index()]
    }

    /// Last read acceleration on all axes
    pub fn get_acceleration(&self) -> Vector3 {
        self.acceleration
    }

    /// Last read angular speed on one axis
    pub fn get_angular_speed_axis(&self, axis: Axis) -> f32 {
        self.angular_speed[axis.index()]
    }

    /// Last read angular speed on all axes
    pub fn get_angular_speed(&self) -> Vector3 {
        self.angular_speed
    }

    /// Last read temperature
    pub fn get_temperature(&self) -> f32 {
        self.temperature
    }

    // ==================== Working ranges ====================

    /// Set the live accelerometer range (no backend transaction)
    pub fn set_acceleration_working_range(&mut self, range: AccelerationRange) {
        self.acceleration_range = range;
    }

    pub fn get_acceleration_working_range(&self) -> AccelerationRange {
        self.acceleration_range
    }

    /// Set the live gyroscope range (no backend transaction)
    pub fn set_angular_speed_working_range(&mut self, range: AngularSpeedRange) {
        self.angular_speed_range = range;
    }

    pub fn get_angular_speed_working_range(&self) -> AngularSpeedRange {
        self.angular_speed_range
    }

    fn live_ranges(&self) -> RangeConfiguration {
        RangeConfiguration::new(self.acceleration_range, self.angular_speed_range)
    }

    /// Pull the staged ranges from the backend into the live configuration
    pub fn read_configuration(&mut self) -> Result<()> {
        let staged = self.backend.read_configuration()?;
        self.acceleration_range = staged.acceleration;
        self.angular_speed_range = staged.angular_speed;
        tracing::debug!(
            "Read configuration from 0x{:02x}: acceleration {}, angular speed {}",
            self.address,
            staged.acceleration,
            staged.angular_speed
        );
        Ok(())
    }

    /// Push the live configuration to the backend
    pub fn write_configuration(&mut self) -> Result<()> {
        let live = self.live_ranges();
        self.backend.write_configuration(live)?;
        tracing::debug!(
            "Wrote configuration to 0x{:02x}: acceleration {}, angular speed {}",
            self.address,
            live.acceleration,
            live.angular_speed
        );
        Ok(())
    }

    // ==================== Reads ====================

    fn sample(&mut self) -> Result<RawSample> {
        let ranges = self.live_ranges();
        self.backend.sample(ranges)
    }

    /// Read acceleration into the snapshot (one backend transaction)
    pub fn read_acceleration(&mut self) -> Result<()> {
        let sample = self.sample()?;
        self.acceleration = sample.acceleration;
        Ok(())
    }

    /// Read angular speed into the snapshot (one backend transaction)
    pub fn read_angular_speed(&mut self) -> Result<()> {
        let sample = self.sample()?;
        self.angular_speed = sample.angular_speed;
        Ok(())
    }

    /// Read temperature into the snapshot (one backend transaction)
    pub fn read_temperature(&mut self) -> Result<()> {
        let sample = self.sample()?;
        self.temperature = sample.temperature;
        Ok(())
    }

    /// Read every value into the snapshot from a single transaction
    pub fn read_data(&mut self) -> Result<()> {
        let sample = self.sample()?;
        self.acceleration = sample.acceleration;
        self.angular_speed = sample.angular_speed;
        self.temperature = sample.temperature;
        Ok(())
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.backend.detach();
        tracing::debug!("Released sensor object for 0x{:02x}", self.address);
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("address", &format_args!("0x{:02x}", self.address))
            .field("backend", &self.backend.kind())
            .field("acceleration_range", &self.acceleration_range)
            .field("angular_speed_range", &self.angular_speed_range)
            .field("acceleration", &self.acceleration)
            .field("angular_speed", &self.angular_speed)
            .field("temperature", &self.temperature)
            .finish()
    }
}
