//! Hardware backend for a sensor on an I2C bus
//!
//! This module speaks the MPU-60X0 register protocol through the [`I2cBus`]
//! trait. The crate ships no bus implementation; callers plug in whatever
//! talks to their adapter.
//!
//! # Transactions
//!
//! - **attach**: write `PWR_MGMT_1 = 0` to wake the sensor
//! - **who_am_i**: read `WHO_AM_I`, masked to bits 6:1
//! - **read/write configuration**: FS_SEL fields of `GYRO_CONFIG` / `ACCEL_CONFIG`
//! - **sample**: 14-byte burst from `ACCEL_XOUT_H`, big-endian i16 words
//!
//! Values are reported as raw register counts; no unit conversion is applied.

use crate::error::{Result, SensorError};
use crate::types::{AccelerationRange, AngularSpeedRange, RangeConfiguration};

use super::registers;
use super::sensor_trait::{BackendKind, BackendStats, RawSample, SensorBackend};

/// Errors reported by a bus implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Device did not acknowledge
    Nack,
    /// Bus arbitration lost or other low-level failure
    Bus(String),
    /// Transaction timed out
    Timeout,
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusError::Nack => write!(f, "device did not acknowledge"),
            BusError::Bus(msg) => write!(f, "{}", msg),
            BusError::Timeout => write!(f, "transaction timed out"),
        }
    }
}

/// I2C bus interface
///
/// # Invariants
///
/// - Only one owner per bus instance
/// - Address is 7-bit (0x00..=0x7F)
#[cfg_attr(test, mockall::automock)]
pub trait I2cBus: Send {
    /// START - ADDR(W) - DATA - STOP
    fn write(&mut self, address: u8, data: &[u8]) -> std::result::Result<(), BusError>;

    /// START - ADDR(W) - WRITE_DATA - REPEATED_START - ADDR(R) - READ_DATA - STOP
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buffer: &mut [u8],
    ) -> std::result::Result<(), BusError>;
}

/// Sensor backend on a real register bus
pub struct HardwareBackend<B: I2cBus> {
    bus: B,
    address: Option<u8>,
    stats: BackendStats,
}

impl<B: I2cBus> HardwareBackend<B> {
    /// Create a backend over the given bus
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            address: None,
            stats: BackendStats::default(),
        }
    }

    /// Give the bus back
    pub fn into_inner(self) -> B {
        self.bus
    }

    fn attached_address(&self) -> Result<u8> {
        self.address.ok_or_else(|| SensorError::Bus {
            address: 0,
            message: "backend not attached".to_string(),
        })
    }

    fn bus_error(address: u8, register: u8, err: BusError) -> SensorError {
        SensorError::Bus {
            address,
            message: format!("register 0x{:02x}: {}", register, err),
        }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        let address = self.attached_address()?;
        self.bus
            .write(address, &[register, value])
            .map_err(|e| Self::bus_error(address, register, e))
    }

    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        let address = self.attached_address()?;
        self.bus
            .write_read(address, &[register], buffer)
            .map_err(|e| Self::bus_error(address, register, e))
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    fn read_measurements(&mut self) -> Result<RawSample> {
        let mut buf = [0u8; registers::MEASUREMENT_LEN];
        self.read_registers(registers::ACCEL_XOUT_H, &mut buf)?;

        let word = |i: usize| i16::from_be_bytes([buf[2 * i], buf[2 * i + 1]]) as f32;
        Ok(RawSample {
            acceleration: [word(0), word(1), word(2)],
            temperature: word(3),
            angular_speed: [word(4), word(5), word(6)],
        })
    }
}

fn fs_sel(register_value: u8) -> u8 {
    (register_value >> registers::FS_SEL_SHIFT) & registers::FS_SEL_MASK
}

impl<B: I2cBus> SensorBackend for HardwareBackend<B> {
    fn kind(&self) -> BackendKind {
        BackendKind::Hardware
    }

    fn attach(&mut self, address: u8) -> Result<()> {
        self.address = Some(address);
        self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_WAKE)
            .map_err(|e| {
                self.address = None;
                SensorError::AllocationFailure {
                    address,
                    reason: e.to_string(),
                }
            })?;
        tracing::debug!("Hardware sensor at 0x{:02x} woken up", address);
        Ok(())
    }

    fn detach(&mut self) {
        self.address = None;
    }

    fn who_am_i(&mut self) -> Result<u8> {
        Ok(self.read_register(registers::WHO_AM_I)? & registers::WHO_AM_I_MASK)
    }

    fn read_configuration(&mut self) -> Result<RangeConfiguration> {
        let gyro = self.read_register(registers::GYRO_CONFIG)?;
        let accel = self.read_register(registers::ACCEL_CONFIG)?;
        self.stats.configuration_reads += 1;
        Ok(RangeConfiguration {
            acceleration: AccelerationRange::from_code(fs_sel(accel))?,
            angular_speed: AngularSpeedRange::from_code(fs_sel(gyro))?,
        })
    }

    fn write_configuration(&mut self, config: RangeConfiguration) -> Result<()> {
        self.write_register(
            registers::GYRO_CONFIG,
            config.angular_speed.code() << registers::FS_SEL_SHIFT,
        )?;
        self.write_register(
            registers::ACCEL_CONFIG,
            config.acceleration.code() << registers::FS_SEL_SHIFT,
        )?;
        self.stats.configuration_writes += 1;
        Ok(())
    }

    fn sample(&mut self, _ranges: RangeConfiguration) -> Result<RawSample> {
        let result = self.read_measurements();
        self.stats.record_sample(&result);
        result
    }

    fn stats(&self) -> &BackendStats {
        &self.stats
    }
}
