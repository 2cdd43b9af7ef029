//! Sampling session module
//!
//! A session connects to a device, checks its identity, pushes the working
//! ranges and then writes one record per sample to an output sink.
//!
//! # Components
//!
//! - [`SamplePipeline`] - The connect/identify/configure/sample state machine
//! - [`RecordWriter`] - Serializes records to stdout or a file
//! - [`SampleRecord`] - The seven values of one sample

pub mod pipeline;
pub mod record;
pub mod writer;

pub use pipeline::{PipelineSettings, PipelineState, SamplePipeline, SessionReport};
pub use record::{RecordFormat, SampleRecord};
pub use writer::{OutputTarget, RecordWriter};
