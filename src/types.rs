//! Core data types for the MPU-60X0 sensor
//!
//! This module contains the value types shared by the device handle, the
//! backends and the sampling session.
//!
//! # Main Types
//!
//! - [`Axis`] - One of the three measurement axes
//! - [`AccelerationRange`] - Accelerometer full-scale range (±2g .. ±16g)
//! - [`AngularSpeedRange`] - Gyroscope full-scale range (±250 .. ±2000 °/s)
//! - [`RangeConfiguration`] - A pair of working ranges as held by a backend
//!
//! # Range Codes
//!
//! Both range enums map to the integers `0..=3`. These codes are the ones
//! written into the configuration registers and the only form used when a
//! range is serialized (config files, JSON), so they must never be reordered.

use crate::error::{Result, SensorError};
use serde::{Deserialize, Serialize};

/// Device identifier reported by WHO_AM_I, also the default bus address
pub const MPU60X0_DEVICE_ID: u8 = 0x68;

/// Address-select bit driven by the AD0 pin
pub const ADDRESS_SELECT_BIT: u8 = 0x02;

/// Three-axis measurement (x, y, z)
pub type Vector3 = [f32; 3];

/// Compute the bus address from the state of the address-select pin
pub fn default_address(address_bit: bool) -> u8 {
    if address_bit {
        MPU60X0_DEVICE_ID | ADDRESS_SELECT_BIT
    } else {
        MPU60X0_DEVICE_ID
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All axes in record order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into a [`Vector3`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Axis {
    type Error = SensorError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(SensorError::InvalidAxis(other)),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Accelerometer working range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccelerationRange {
    /// ±2g
    #[default]
    G2 = 0,
    /// ±4g
    G4 = 1,
    /// ±8g
    G8 = 2,
    /// ±16g
    G16 = 3,
}

impl AccelerationRange {
    pub const ALL: [AccelerationRange; 4] = [
        AccelerationRange::G2,
        AccelerationRange::G4,
        AccelerationRange::G8,
        AccelerationRange::G16,
    ];

    /// Integer code used on the wire and in config files
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a range from its integer code
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(SensorError::InvalidRange {
                kind: "acceleration",
                code,
            })
    }

    /// Full-scale value in g
    pub fn full_scale_g(self) -> u16 {
        2 << self.code()
    }
}

impl TryFrom<u8> for AccelerationRange {
    type Error = SensorError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<AccelerationRange> for u8 {
    fn from(range: AccelerationRange) -> u8 {
        range.code()
    }
}

impl std::fmt::Display for AccelerationRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "±{}g", self.full_scale_g())
    }
}

/// Gyroscope working range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum AngularSpeedRange {
    /// ±250 °/s
    #[default]
    Dps250 = 0,
    /// ±500 °/s
    Dps500 = 1,
    /// ±1000 °/s
    Dps1000 = 2,
    /// ±2000 °/s
    Dps2000 = 3,
}

impl AngularSpeedRange {
    pub const ALL: [AngularSpeedRange; 4] = [
        AngularSpeedRange::Dps250,
        AngularSpeedRange::Dps500,
        AngularSpeedRange::Dps1000,
        AngularSpeedRange::Dps2000,
    ];

    /// Integer code used on the wire and in config files
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a range from its integer code
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(SensorError::InvalidRange {
                kind: "angular speed",
                code,
            })
    }

    /// Full-scale value in degrees per second
    pub fn full_scale_dps(self) -> u16 {
        250 << self.code()
    }
}

impl TryFrom<u8> for AngularSpeedRange {
    type Error = SensorError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<AngularSpeedRange> for u8 {
    fn from(range: AngularSpeedRange) -> u8 {
        range.code()
    }
}

impl std::fmt::Display for AngularSpeedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "±{}°/s", self.full_scale_dps())
    }
}

/// Pair of working ranges, as staged in a backend or held by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeConfiguration {
    pub acceleration: AccelerationRange,
    pub angular_speed: AngularSpeedRange,
}

impl RangeConfiguration {
    pub fn new(acceleration: AccelerationRange, angular_speed: AngularSpeedRange) -> Self {
        Self {
            acceleration,
            angular_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        assert_eq!(default_address(false), 0x68);
        assert_eq!(default_address(true), 0x6a);
    }

    #[test]
    fn test_axis_from_index() {
        assert_eq!(Axis::try_from(0).unwrap(), Axis::X);
        assert_eq!(Axis::try_from(2).unwrap(), Axis::Z);
        assert!(matches!(Axis::try_from(3), Err(SensorError::InvalidAxis(3))));
    }

    #[test]
    fn test_range_codes() {
        for (code, range) in AccelerationRange::ALL.iter().enumerate() {
            assert_eq!(range.code() as usize, code);
            assert_eq!(AccelerationRange::from_code(code as u8).unwrap(), *range);
        }
        for (code, range) in AngularSpeedRange::ALL.iter().enumerate() {
            assert_eq!(range.code() as usize, code);
            assert_eq!(AngularSpeedRange::from_code(code as u8).unwrap(), *range);
        }
        assert!(AccelerationRange::from_code(4).is_err());
        assert!(AngularSpeedRange::from_code(200).is_err());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(AccelerationRange::G16.to_string(), "±16g");
        assert_eq!(AngularSpeedRange::Dps1000.to_string(), "±1000°/s");
    }

    #[test]
    fn test_range_serialized_as_code() {
        let config = RangeConfiguration::new(AccelerationRange::G8, AngularSpeedRange::Dps500);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"acceleration":2,"angular_speed":1}"#);

        let parsed: RangeConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_range_out_of_code_space_rejected() {
        let json = r#"{"acceleration":4,"angular_speed":0}"#;
        assert!(serde_json::from_str::<RangeConfiguration>(json).is_err());
        assert!(serde_json::from_str::<AngularSpeedRange>(r#""500""#).is_err());
    }
}
