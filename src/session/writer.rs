//! Record writer over an output sink
//!
//! The sink is opened once before sampling starts and flushed when the writer
//! is finished or dropped, so every exit path of a session closes it.

use crate::error::{Result, SensorError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::record::{RecordFormat, SampleRecord};

/// Where records go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// A file, created or truncated on open
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p.to_path_buf()),
            None => OutputTarget::Stdout,
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputTarget::Stdout)
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Writes one serialized record per sample
pub struct RecordWriter<W: Write> {
    /// Taken out only by `into_inner`
    writer: Option<BufWriter<W>>,
    format: RecordFormat,
    records_written: u64,
}

impl RecordWriter<Box<dyn Write + Send>> {
    /// Open the target
    ///
    /// Fails with [`SensorError::SinkUnavailable`] when a file cannot be created.
    pub fn open(target: &OutputTarget, format: RecordFormat) -> Result<Self> {
        let sink: Box<dyn Write + Send> = match target {
            OutputTarget::Stdout => Box::new(std::io::stdout()),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| SensorError::SinkUnavailable {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!("Writing samples to {:?}", path);
                Box::new(file)
            }
        };
        Ok(Self::new(sink, format))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wrap an already opened sink
    pub fn new(sink: W, format: RecordFormat) -> Self {
        Self {
            writer: Some(BufWriter::new(sink)),
            format,
            records_written: 0,
        }
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Serialize and write one record
    ///
    /// The whole line is built before anything reaches the sink.
    pub fn write_record(&mut self, record: &SampleRecord) -> Result<()> {
        let line = match self.format {
            RecordFormat::Text => record.to_line(),
            RecordFormat::Json => record.to_json_line()?,
        };
        if let Some(ref mut writer) = self.writer {
            writer.write_all(line.as_bytes())?;
            self.records_written += 1;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and give back the sink
    pub fn into_inner(mut self) -> Result<W> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| SensorError::Config("output already closed".to_string()))?;
        writer
            .into_inner()
            .map_err(|e| SensorError::Io(e.into_error()))
    }
}

impl<W: Write> Drop for RecordWriter<W> {
    fn drop(&mut self) {
        if let Some(ref mut writer) = self.writer {
            if let Err(e) = writer.flush() {
                tracing::error!("Failed to flush sample output: {}", e);
            }
            if self.records_written > 0 {
                tracing::debug!("Output closed after {} records", self.records_written);
            }
        }
    }
}
