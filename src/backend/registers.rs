//! MPU-60X0 Register Definitions
//!
//! Only the registers the hardware backend touches.

/// Gyroscope configuration (FS_SEL in bits 4:3)
pub const GYRO_CONFIG: u8 = 0x1B;

/// Accelerometer configuration (AFS_SEL in bits 4:3)
pub const ACCEL_CONFIG: u8 = 0x1C;

/// First of 14 measurement registers: accel (6), temp (2), gyro (6)
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Power management 1
pub const PWR_MGMT_1: u8 = 0x6B;

/// Device identifier
pub const WHO_AM_I: u8 = 0x75;

/// PWR_MGMT_1 value that clears SLEEP and selects the internal oscillator
pub const PWR_MGMT_1_WAKE: u8 = 0x00;

/// Bit offset of the full-scale select field in GYRO_CONFIG / ACCEL_CONFIG
pub const FS_SEL_SHIFT: u8 = 3;

/// Mask of the full-scale select field (after shifting)
pub const FS_SEL_MASK: u8 = 0x03;

/// WHO_AM_I holds the upper six bits of the address in bits 6:1
pub const WHO_AM_I_MASK: u8 = 0x7E;

/// Length of the measurement burst starting at ACCEL_XOUT_H
pub const MEASUREMENT_LEN: usize = 14;
