//! # mpu60x0-logger: MPU-60X0 sensor abstraction and sample logger
//!
//! A device handle for the MPU-60X0 accelerometer/gyroscope, backed either by
//! the register protocol over an I2C bus or by a deterministic simulator, plus
//! a small pipeline that writes one record per sample to stdout or a file.
//!
//! ## Architecture
//!
//! - **Device**: Per-handle state (address, working ranges, last snapshot)
//! - **Backend**: Produces raw values; hardware over [`backend::I2cBus`] or simulated
//! - **Session**: Connect, identify, configure, then sample and write records
//!
//! ## Configuration
//!
//! Settings are read from `config.toml` in the platform config directory under
//! `mpu60x0-logger`, or from the file given with `--config`:
//!
//! - **Linux**: `~/.config/mpu60x0-logger/`
//! - **macOS**: `~/Library/Application Support/mpu60x0-logger/`
//! - **Windows**: `%APPDATA%\mpu60x0-logger\`
//!
//! ## Example
//!
//! ```ignore
//! use mpu60x0_logger::{
//!     backend::SimulatedBackend,
//!     session::{PipelineSettings, RecordFormat, RecordWriter, SamplePipeline},
//! };
//!
//! let mut writer = RecordWriter::new(std::io::stdout(), RecordFormat::Text);
//! let mut pipeline = SamplePipeline::new(PipelineSettings {
//!     sample_count: 10,
//!     ..Default::default()
//! });
//! let report = pipeline.run(Box::new(SimulatedBackend::new()), &mut writer)?;
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use backend::{SensorBackend, SimulatedBackend};
pub use config::LoggerConfig;
pub use device::Device;
pub use error::{Result, SensorError};
pub use session::{RecordWriter, SamplePipeline, SampleRecord, SessionReport};
pub use types::{AccelerationRange, AngularSpeedRange, Axis, RangeConfiguration};
