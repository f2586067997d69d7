use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::acquisition::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_INTERVAL, SampleAcquirer};
use crate::config::BackendChoice;
use crate::config::backend_choice::SimulatedParameters;
use crate::core::VoltageConverter;
use crate::core::conversion::DEFAULT_REFERENCE_VOLTAGE;
use crate::error::HeightError;
use crate::estimation::{DEFAULT_STD_DEV_THRESHOLD, OutlierTrimEstimator};
use crate::sources::ChannelId;

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_sample_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL.as_millis() as u64
}

fn default_std_dev_threshold() -> f64 {
    DEFAULT_STD_DEV_THRESHOLD
}

fn default_reference_voltage() -> f64 {
    DEFAULT_REFERENCE_VOLTAGE
}

/// Everything needed to build a [`HeightDriver`](crate::driver::HeightDriver).
///
/// Every field but `backend` has a default, so a config file may be as
/// small as `{"backend": {"type": "simulated", "params": {}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DriverConfig {
    #[serde(default = "default_sample_count")]
    #[schemars(
        title = "Sample Count",
        description = "Converter reads per measurement",
        range(min = 1, max = 10000)
    )]
    pub sample_count: usize,

    #[serde(default = "default_sample_interval_ms")]
    #[schemars(
        title = "Sample Interval",
        description = "Milliseconds to wait between consecutive reads"
    )]
    pub sample_interval_ms: u64,

    #[serde(default = "default_std_dev_threshold")]
    #[schemars(
        title = "Std. Dev. Threshold",
        description = "Population standard deviation (m) under which trimming stops"
    )]
    pub std_dev_threshold: f64,

    #[serde(default = "default_reference_voltage")]
    #[schemars(
        title = "Reference Voltage",
        description = "Full-scale voltage used to normalize converter counts"
    )]
    pub reference_voltage: f64,

    #[serde(default)]
    #[schemars(title = "Channel", description = "MCP3008 input the sensor is wired to")]
    pub channel: ChannelId,

    #[schemars(title = "Backend", description = "Converter implementation")]
    pub backend: BackendChoice,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            sample_interval_ms: default_sample_interval_ms(),
            std_dev_threshold: DEFAULT_STD_DEV_THRESHOLD,
            reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
            channel: ChannelId::default(),
            backend: BackendChoice::Simulated(SimulatedParameters::default()),
        }
    }
}

impl DriverConfig {
    /// Reads, parses and validates a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HeightError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(
            "loaded driver config from {} ({} backend, {} samples on {})",
            path.display(),
            config.backend.kind(),
            config.sample_count,
            config.channel
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, HeightError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HeightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), HeightError> {
        self.acquirer()?;
        self.estimator()?;
        Ok(())
    }

    #[inline]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn acquirer(&self) -> Result<SampleAcquirer, HeightError> {
        SampleAcquirer::new(
            self.sample_count,
            self.sample_interval(),
            self.channel,
            VoltageConverter::new(self.reference_voltage),
        )
    }

    pub fn estimator(&self) -> Result<OutlierTrimEstimator, HeightError> {
        OutlierTrimEstimator::new(self.std_dev_threshold)
    }

    pub fn schema() -> Schema {
        schema_for!(DriverConfig)
    }
}
