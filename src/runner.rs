//! Drives a stream of events through a transform.
//!
//! The runner is the local harness around the transformer: it reads events,
//! applies the transform to each one, and writes every resulting event in
//! order. Delivery and retries stay with the hosting pipeline.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TransformError};
use crate::serialization::{EventWriter, JsonArrayWriter, NdjsonReader, NdjsonWriter};
use crate::transform::EventTransform;

/// Environment variable overriding [`RunnerConfig::format`].
pub const ENV_FORMAT: &str = "EVENT_TRANSFORM_FORMAT";
/// Environment variable overriding [`RunnerConfig::skip_invalid`].
pub const ENV_SKIP_INVALID: &str = "EVENT_TRANSFORM_SKIP_INVALID";

/// Output encoding for transformed events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Ndjson,
    JsonArray,
}

impl std::str::FromStr for OutputFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ndjson" => Ok(OutputFormat::Ndjson),
            "json-array" | "json_array" => Ok(OutputFormat::JsonArray),
            other => Err(TransformError::ConfigError(format!(
                "Unknown output format '{}' (expected ndjson or json-array)",
                other
            ))),
        }
    }
}

/// Runner configuration.
///
/// Layered lowest to highest: YAML file, environment, command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Input file; `None` or `-` reads stdin.
    pub input: Option<PathBuf>,

    /// Output file; `None` writes stdout.
    pub output: Option<PathBuf>,

    pub format: OutputFormat,

    /// Log and skip unparseable input lines instead of aborting.
    pub skip_invalid: bool,
}

impl RunnerConfig {
    /// Load configuration from a YAML file.
    ///
    /// Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            TransformError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&contents)
            .map_err(|e| TransformError::ConfigError(format!("Failed to parse YAML: {}", e)))
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse()?;
        }
        if let Some(flag) = lookup(ENV_SKIP_INVALID) {
            self.skip_invalid = parse_flag(&flag)?;
        }
        Ok(self)
    }

    fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(TransformError::ConfigError(format!(
            "Invalid boolean '{}' for {}",
            other, ENV_SKIP_INVALID
        ))),
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Events read and transformed
    pub events_in: usize,
    /// Events written, fan-out included
    pub events_out: usize,
    /// Inputs that produced more than one event
    pub fanned_out: usize,
    /// Input lines skipped as invalid
    pub skipped: usize,
}

pub struct Runner<T: EventTransform> {
    config: RunnerConfig,
    transform: T,
}

impl<T: EventTransform> Runner<T> {
    pub fn new(config: RunnerConfig, transform: T) -> Self {
        Self { config, transform }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Transform every event from `reader` into `writer`.
    ///
    /// Output events keep input order, and a fan-out's events stay together in
    /// the order the transform produced them.
    pub fn run<R: BufRead, W: EventWriter>(&self, reader: R, mut writer: W) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for item in NdjsonReader::new(reader) {
            let event = match item {
                Ok(event) => event,
                Err(TransformError::JsonError { line, source }) if self.config.skip_invalid => {
                    tracing::warn!("Skipping invalid event on line {}: {}", line, source);
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            stats.events_in += 1;
            let output = self.transform.apply(event);
            if output.is_fan_out() {
                stats.fanned_out += 1;
            }

            for event in output {
                writer.write(&event)?;
                stats.events_out += 1;
            }
        }

        writer.finish()?;

        tracing::info!(
            transform = self.transform.name(),
            events_in = stats.events_in,
            events_out = stats.events_out,
            fanned_out = stats.fanned_out,
            skipped = stats.skipped,
            "Run complete"
        );

        Ok(stats)
    }

    /// Open the configured input and output and run.
    pub fn run_configured(&self) -> Result<RunStats> {
        let reader = self.open_input()?;
        let output = self.open_output()?;

        match self.config.format {
            OutputFormat::Ndjson => self.run(reader, NdjsonWriter::new(output)),
            OutputFormat::JsonArray => self.run(reader, JsonArrayWriter::new(output)?),
        }
    }

    fn open_input(&self) -> Result<Box<dyn BufRead>> {
        match &self.config.input {
            Some(path) if !self.config.reads_stdin() => {
                tracing::debug!("Reading events from {}", path.display());
                Ok(Box::new(BufReader::new(File::open(path)?)))
            }
            _ => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.config.output {
            Some(path) => {
                tracing::debug!("Writing events to {}", path.display());
                Ok(Box::new(BufWriter::new(File::create(path)?)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}
