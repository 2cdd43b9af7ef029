//! Sample pipeline: connect, identify, configure, then sample in a loop
//!
//! The pipeline is strictly sequential. One sample is read and fully written
//! before the next one starts, with a blocking delay in between.
//!
//! ```text
//! Connecting -> Identifying -> Configuring -> Sampling(1..=n) -> Done
//!      \              \              \              \
//!       +--------------+--------------+--------------+--> Failed
//! ```

use crate::backend::SensorBackend;
use crate::device::Device;
use crate::error::{Result, SensorError};
use crate::types::{RangeConfiguration, MPU60X0_DEVICE_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::record::SampleRecord;
use super::writer::RecordWriter;

/// Where the pipeline currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Not started yet
    #[default]
    Idle,
    /// Creating the device handle
    Connecting,
    /// Checking the device identifier
    Identifying,
    /// Pushing the working ranges
    Configuring,
    /// Reading and writing sample `k` (1-based)
    Sampling(u32),
    /// All samples written, handle released
    Done,
    /// Stopped on an error or cancellation
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Connecting => "Connecting",
            PipelineState::Identifying => "Identifying",
            PipelineState::Configuring => "Configuring",
            PipelineState::Sampling(_) => "Sampling",
            PipelineState::Done => "Done",
            PipelineState::Failed => "Failed",
        }
    }
}

/// Inputs of one sampling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Bus address of the sensor
    pub address: u8,
    /// Number of samples to write
    pub sample_count: u32,
    /// Delay after each sample
    pub delay: Duration,
    /// Identifier the device must report
    pub expected_id: u8,
    /// Working ranges to push before sampling
    pub ranges: RangeConfiguration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            address: MPU60X0_DEVICE_ID,
            sample_count: 0,
            delay: Duration::ZERO,
            expected_id: MPU60X0_DEVICE_ID,
            ranges: RangeConfiguration::default(),
        }
    }
}

/// Summary of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub address: u8,
    pub device_id: u8,
    pub samples_written: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives a device through one sampling session
#[derive(Debug)]
pub struct SamplePipeline {
    settings: PipelineSettings,
    state: PipelineState,
    /// Set from outside to stop at the next sample boundary
    cancel: Arc<AtomicBool>,
}

impl SamplePipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            settings,
            state: PipelineState::Idle,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a cancellation flag with the caller
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that stops the loop when set to `true`
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::trace!("Pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the whole session
    ///
    /// The device handle is released on every exit path; completed records
    /// are flushed to `writer` even when the session fails.
    pub fn run<W: Write>(
        &mut self,
        backend: Box<dyn SensorBackend>,
        writer: &mut RecordWriter<W>,
    ) -> Result<SessionReport> {
        let result = match (self.run_inner(backend, writer), writer.flush()) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(flush_err)) => Err(flush_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(flush_err)) => {
                tracing::error!("Failed to flush sample output: {}", flush_err);
                Err(e)
            }
        };

        match result {
            Ok(report) => {
                self.transition(PipelineState::Done);
                Ok(report)
            }
            Err(e) => {
                self.transition(PipelineState::Failed);
                tracing::error!("{}", e);
                Err(e)
            }
        }
    }

    fn run_inner<W: Write>(
        &mut self,
        backend: Box<dyn SensorBackend>,
        writer: &mut RecordWriter<W>,
    ) -> Result<SessionReport> {
        let settings = self.settings;
        let started_at = Utc::now();

        self.transition(PipelineState::Connecting);
        tracing::info!("Connecting to I2C-device 0x{:02x}", settings.address);
        let mut device = Device::new(settings.address, backend)?;
        tracing::debug!("Connected");

        self.transition(PipelineState::Identifying);
        let device_id = device.identify()?;
        if device_id != settings.expected_id {
            return Err(SensorError::IdentityMismatch {
                address: settings.address,
                expected: settings.expected_id,
                actual: device_id,
            });
        }

        self.transition(PipelineState::Configuring);
        device.set_acceleration_working_range(settings.ranges.acceleration);
        device.set_angular_speed_working_range(settings.ranges.angular_speed);
        device.write_configuration()?;

        let mut completed = 0u32;
        for k in 1..=settings.sample_count {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::warn!("Sampling cancelled after {} samples", completed);
                return Err(SensorError::Cancelled { completed });
            }

            self.transition(PipelineState::Sampling(k));
            tracing::info!("{}/{}: read data from sensor", k, settings.sample_count);
            device.read_data()?;
            writer.write_record(&SampleRecord::from_device(&device))?;
            completed = k;

            if !settings.delay.is_zero() {
                std::thread::sleep(settings.delay);
            }
        }

        device.close();

        Ok(SessionReport {
            address: settings.address,
            device_id,
            samples_written: completed,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
