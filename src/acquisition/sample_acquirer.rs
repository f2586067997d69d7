use std::thread;
use std::time::Duration;

use log::{Level, debug, log_enabled, trace};

use crate::core::{SampleBatch, VoltageConverter};
use crate::error::HeightError;
use crate::sources::{ChannelId, SampleSource};

/// Samples per measurement.
pub const DEFAULT_SAMPLE_COUNT: usize = 30;

/// Largest batch a single measurement may request. At the default 5 ms
/// cadence this is already close to a minute of reads.
pub const MAX_SAMPLE_COUNT: usize = 10_000;

/// Pause between consecutive converter reads.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(5);

/// Drives one fixed-size, fixed-cadence batch of reads through a source.
///
/// Reads are strictly sequential: sample `i + 1` is requested only after
/// sample `i` was converted and the interval elapsed. The first failed read
/// abandons the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleAcquirer {
    count: usize,
    interval: Duration,
    channel: ChannelId,
    converter: VoltageConverter,
}

impl SampleAcquirer {
    pub fn new(
        count: usize,
        interval: Duration,
        channel: ChannelId,
        converter: VoltageConverter,
    ) -> Result<Self, HeightError> {
        if !(1..=MAX_SAMPLE_COUNT).contains(&count) {
            return Err(HeightError::InvalidConfig(format!(
                "sample count must be between 1 and {MAX_SAMPLE_COUNT}, got {count}"
            )));
        }
        let reference = converter.reference_voltage();
        if !(reference.is_finite() && reference > 0.0) {
            return Err(HeightError::InvalidConfig(format!(
                "reference voltage must be finite and > 0, got {reference}"
            )));
        }
        Ok(Self {
            count,
            interval,
            channel,
            converter,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn converter(&self) -> VoltageConverter {
        self.converter
    }

    pub fn acquire_batch(&self, source: &mut dyn SampleSource) -> Result<SampleBatch, HeightError> {
        let reference = self.converter.reference_voltage();
        let mut batch = SampleBatch::with_capacity(self.count);

        for i in 0..self.count {
            if i > 0 {
                thread::sleep(self.interval);
            }
            let raw = source.read_channel(self.channel, reference)?;
            let distance = self.converter.convert(raw);
            trace!("sample {i}: raw={raw} distance={distance:.6} m");
            batch.push(distance);
        }

        if log_enabled!(Level::Debug) {
            debug!(
                "acquired {} samples on {} ({}V reference): mean={:.4} m std_dev={:.4} m",
                batch.len(),
                self.channel,
                reference,
                batch.mean().unwrap_or(f64::NAN),
                batch.std_dev().unwrap_or(f64::NAN),
            );
        }
        Ok(batch)
    }
}

impl Default for SampleAcquirer {
    fn default() -> Self {
        Self {
            count: DEFAULT_SAMPLE_COUNT,
            interval: DEFAULT_SAMPLE_INTERVAL,
            channel: ChannelId::default(),
            converter: VoltageConverter::default(),
        }
    }
}
