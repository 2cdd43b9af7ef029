//! Command-line parsing
//!
//! ```text
//! mpu60x0-logger [-a addressBit] [--addr slaveAddr] [-d delay] [-s samples]
//!                [-o FILENAME] [-v] [--config PATH] [--format text|json]
//! mpu60x0-logger --help
//! mpu60x0-logger --version
//! ```
//!
//! Options given here override the config file.

use crate::config::{LoggerConfig, DEFAULT_DELAY_US, DEFAULT_SAMPLE_COUNT};
use crate::session::RecordFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Largest address `--addr` accepts
const MAX_ADDRESS: u8 = 0x7F;

/// A malformed command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid syntax: {0}")]
pub struct CliError(pub String);

impl CliError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliArgs),
    Help,
    Version,
}

/// Options of a sampling run; `None` leaves the config value in place
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub address_bit: Option<bool>,
    pub address: Option<u8>,
    pub delay_us: Option<u64>,
    pub sample_count: Option<u32>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    pub format: Option<RecordFormat>,
}

impl CliArgs {
    /// Overlay these options onto a loaded config
    pub fn apply(&self, config: &mut LoggerConfig) {
        if let Some(bit) = self.address_bit {
            config.sensor.address_bit = bit;
        }
        if let Some(address) = self.address {
            config.sensor.address = Some(address);
        }
        if let Some(delay) = self.delay_us {
            config.sampling.delay_us = delay;
        }
        if let Some(count) = self.sample_count {
            config.sampling.sample_count = count;
        }
        if let Some(ref path) = self.output {
            config.output.path = Some(path.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
    }
}

/// Parse the arguments following the program name
pub fn parse<I, S>(args: I) -> Result<CliCommand, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let raw: Vec<String> = args.into_iter().map(Into::into).collect();
    let sole = raw.len() == 1;

    let mut args = CliArgs::default();
    let mut i = 0;
    while i < raw.len() {
        match raw[i].as_str() {
            "--help" if sole => return Ok(CliCommand::Help),
            "--version" if sole => return Ok(CliCommand::Version),
            "--help" => return Err(CliError::new("invalid option --help")),
            "--version" => return Err(CliError::new("invalid option --version")),
            "-a" => {
                i += 1;
                let value = value_at(&raw, i)
                    .and_then(parse_decimal::<u32>)
                    .ok_or_else(|| CliError::new("expected addressBitValue after -a"))?;
                args.address_bit = Some(value != 0);
            }
            "--addr" => {
                i += 1;
                let value = value_at(&raw, i).and_then(parse_address).ok_or_else(|| {
                    CliError::new(
                        "expected 7bit address after --addr as unsigned decimal \
                         or hexadecimal value with 0x-prefix.",
                    )
                })?;
                args.address = Some(value);
            }
            "-d" => {
                i += 1;
                let value = value_at(&raw, i)
                    .and_then(parse_decimal::<u64>)
                    .ok_or_else(|| CliError::new("expected delay after -d"))?;
                args.delay_us = Some(value);
            }
            "-s" => {
                i += 1;
                let value = value_at(&raw, i)
                    .and_then(parse_decimal::<u32>)
                    .ok_or_else(|| CliError::new("expected sample count after -s"))?;
                args.sample_count = Some(value);
            }
            "-o" => {
                i += 1;
                let value =
                    value_at(&raw, i).ok_or_else(|| CliError::new("expected filename after -o"))?;
                args.output = Some(PathBuf::from(value));
            }
            "-v" => args.verbose = true,
            "--config" => {
                i += 1;
                let value = value_at(&raw, i)
                    .ok_or_else(|| CliError::new("expected path after --config"))?;
                args.config = Some(PathBuf::from(value));
            }
            "--format" => {
                i += 1;
                let value = value_at(&raw, i)
                    .and_then(|v| v.parse::<RecordFormat>().ok())
                    .ok_or_else(|| CliError::new("expected text or json after --format"))?;
                args.format = Some(value);
            }
            _ => return Err(CliError::new("unknown parameter")),
        }
        i += 1;
    }

    Ok(CliCommand::Run(args))
}

fn value_at(raw: &[String], i: usize) -> Option<&str> {
    raw.get(i).map(String::as_str)
}

/// Plain unsigned decimal, no sign or whitespace
fn parse_decimal<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Unsigned decimal or `0x`-prefixed hexadecimal, 8 bits
/// Parse a 7-bit bus address
fn parse_address(s: &str) -> Option<u8> {
    let value = if let Some(hex) = s.strip_prefix("0x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(hex, 16).ok()?
    } else {
        parse_decimal(s)?
    };
    (value <= MAX_ADDRESS).then_some(value)
}

/// Usage text
pub fn usage(prog: &str) -> String {
    format!(
        "Usage:\n\
         \t{prog} [-a addressBit] [--addr slaveAddr] [-d delay]\n\
         \t\t[-s samples] [-o FILENAME] [-v] [--config PATH] [--format text|json]\n\n\
         \t{prog} --help\n\
         \t{prog} --version\n\
         Options:\n\
         \t-a addressBit=0\n\
         \t\t\tState of the ADR0 pin of the sensor. Ignored when --addr is given.\n\
         \t--addr address\n\
         \t\t\tUse this 7bit slave address (decimal or 0x-prefixed hexadecimal).\n\
         \t-d delay={DEFAULT_DELAY_US}\n\
         \t\t\tDelay in microseconds between sensor readings.\n\
         \t-s samples={DEFAULT_SAMPLE_COUNT}\n\
         \t\t\tNumber of samples to read and write.\n\
         \t-o FILENAME\n\
         \t\t\tWrite records to FILENAME instead of the standard output.\n\
         \t-v\n\
         \t\t\tVerbose mode: print progress and sensor information to stderr.\n\
         \t--config PATH\n\
         \t\t\tRead settings from this TOML file.\n\
         \t--format text|json\n\
         \t\t\tRecord format, default text.\n\
         \t--help\n\
         \t\t\tPrint this help.\n\
         \t--version\n\
         \t\t\tPrint the version.\n"
    )
}
