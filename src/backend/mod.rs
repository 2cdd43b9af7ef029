//! Backend module for producing sensor values
//!
//! A device handle never talks to a bus itself; it delegates every
//! transaction to a [`SensorBackend`] chosen when the handle is created.
//!
//! # Components
//!
//! - [`SensorBackend`] - The capability a device needs from below
//! - [`SimulatedBackend`] - Deterministic synthetic data, no hardware needed
//! - [`HardwareBackend`] - MPU-60X0 register protocol over an [`I2cBus`]
//!
//! # Example
//!
//! ```ignore
//! use mpu60x0_logger::backend::{BackendSelection, SimulatedBackend};
//!
//! let backend = BackendSelection::Simulated { counter_start: 0, angular_speed: false }.build();
//! let device = Device::new(0x68, backend)?;
//! ```

pub mod hardware;
pub mod registers;
pub mod sensor_trait;
pub mod simulated;

pub use hardware::{BusError, HardwareBackend, I2cBus};
pub use sensor_trait::{BackendKind, BackendStats, RawSample, SensorBackend};
pub use simulated::SimulatedBackend;

/// Describes which backend to build for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSelection {
    /// Synthetic data starting at a given counter value
    Simulated {
        counter_start: u32,
        angular_speed: bool,
    },
}

impl Default for BackendSelection {
    fn default() -> Self {
        BackendSelection::Simulated {
            counter_start: 0,
            angular_speed: false,
        }
    }
}

impl BackendSelection {
    /// Build the selected backend
    pub fn build(self) -> Box<dyn SensorBackend> {
        match self {
            BackendSelection::Simulated {
                counter_start,
                angular_speed,
            } => Box::new(
                SimulatedBackend::new()
                    .with_counter(counter_start)
                    .with_angular_speed(angular_speed),
            ),
        }
    }
}

/// Box a hardware backend over a caller-provided bus
pub fn hardware<B: I2cBus + 'static>(bus: B) -> Box<dyn SensorBackend> {
    Box::new(HardwareBackend::new(bus))
}
