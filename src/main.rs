//! MPU-60X0 Logger - Main Entry Point
//!
//! Reads samples from an MPU-60X0 sensor and writes one record per sample
//! to the standard output or a file.

use anyhow::Context;
use mpu60x0_logger::{
    backend::BackendSelection,
    cli::{self, CliArgs, CliCommand},
    config::LoggerConfig,
    logging::{self, LogSettings},
    session::{RecordWriter, SamplePipeline},
    SensorError,
};
use std::process::ExitCode;

const DEFAULT_PROG_NAME: &str = "mpu60x0-logger";

fn main() -> ExitCode {
    let mut argv = std::env::args();
    let prog = argv.next().unwrap_or_else(|| DEFAULT_PROG_NAME.to_string());

    let command = match cli::parse(argv) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprint!("{}", cli::usage(&prog));
            return ExitCode::from(1);
        }
    };

    match command {
        CliCommand::Help => {
            print!("{}", cli::usage(&prog));
            ExitCode::SUCCESS
        }
        CliCommand::Version => {
            eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        CliCommand::Run(args) => match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => exit_code_for(&e),
        },
    }
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut config = LoggerConfig::discover(args.config.as_deref())?;
    args.apply(&mut config);

    // Held until exit so the log file gets flushed
    let _log_guard = logging::init(&LogSettings::new(
        config.logging.verbose,
        config.logging.log_file.clone(),
    ))?;

    let settings = config.pipeline_settings();
    if config.sensor.address.is_none() {
        tracing::debug!("Device address bit:    {}", config.sensor.address_bit);
    }
    tracing::debug!("Device address:        0x{:02x}", settings.address);
    tracing::debug!("Sample count:          {:9}", settings.sample_count);
    tracing::debug!("Delay between samples: {:9}us", config.sampling.delay_us);
    tracing::debug!(
        "Working ranges:        {}, {}",
        settings.ranges.acceleration,
        settings.ranges.angular_speed
    );
    if let Some(ref path) = config.output.path {
        tracing::debug!("Output filename:       {}", path.display());
    }

    let mut writer = RecordWriter::open(&config.output_target(), config.output.format)?;

    let backend = BackendSelection::Simulated {
        counter_start: config.simulation.counter_start,
        angular_speed: config.simulation.angular_speed,
    }
    .build();

    let report = SamplePipeline::new(settings)
        .run(backend, &mut writer)
        .context("sampling session failed")?;

    tracing::info!(
        "Wrote {} samples from 0x{:02x} in {} ms",
        report.samples_written,
        report.address,
        (report.finished_at - report.started_at).num_milliseconds()
    );

    Ok(())
}

/// Report a failure and pick the process exit code
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<SensorError>() {
        Some(SensorError::SinkUnavailable { path, .. }) => {
            eprintln!("Failed to open file <{}>!", path.display());
            ExitCode::from(2)
        }
        // Raised before logging is up
        Some(SensorError::Config(msg)) => {
            eprintln!("{}", msg);
            ExitCode::from(1)
        }
        // Already reported by the pipeline
        Some(_) => ExitCode::from(1),
        None => {
            eprintln!("{:#}", err);
            ExitCode::from(1)
        }
    }
}
