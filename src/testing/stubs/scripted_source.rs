use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::RawSample;
use crate::error::HeightError;
use crate::sources::{ChannelId, SampleSource};

/// Shared view on what a [`ScriptedSource`] was asked to do.
///
/// Stays readable after the source itself moved into a driver.
#[derive(Debug, Clone, Default)]
pub struct SourceSpy {
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    channels: Arc<Mutex<Vec<ChannelId>>>,
}

impl SourceSpy {
    /// Number of `read` calls, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `close` calls.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Distinct channels requested, in order of first use.
    pub fn channels(&self) -> Vec<ChannelId> {
        self.channels.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// Replays a fixed list of raw counts, cycling when it runs out.
#[derive(Debug)]
pub struct ScriptedSource {
    counts: Vec<RawSample>,
    cursor: usize,
    fail_on_read: Option<usize>,
    fail_on_close: bool,
    spy: SourceSpy,
}

impl ScriptedSource {
    pub fn new(counts: Vec<RawSample>) -> Self {
        Self {
            counts,
            cursor: 0,
            fail_on_read: None,
            fail_on_close: false,
            spy: SourceSpy::default(),
        }
    }

    pub fn constant(raw: RawSample) -> Self {
        Self::new(vec![raw])
    }

    /// Makes the `n`-th read (1-based) fail with a hardware error.
    pub fn failing_on_read(mut self, n: usize) -> Self {
        self.fail_on_read = Some(n);
        self
    }

    pub fn failing_on_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }

    pub fn spy(&self) -> SourceSpy {
        self.spy.clone()
    }

    fn next_count(&mut self) -> RawSample {
        if self.counts.is_empty() {
            return 0;
        }
        let raw = self.counts[self.cursor % self.counts.len()];
        self.cursor += 1;
        raw
    }
}

impl SampleSource for ScriptedSource {
    fn read(
        &mut self,
        channels: &[ChannelId],
        _reference_voltage: f64,
    ) -> Result<Vec<RawSample>, HeightError> {
        let n = self.spy.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut seen) = self.spy.channels.lock() {
            for channel in channels {
                if !seen.contains(channel) {
                    seen.push(*channel);
                }
            }
        }
        if self.fail_on_read == Some(n) {
            return Err(HeightError::HardwareRead(format!(
                "scripted failure on read {n}"
            )));
        }
        Ok(channels.iter().map(|_| self.next_count()).collect())
    }

    fn close(&mut self) -> Result<(), HeightError> {
        self.spy.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_close {
            return Err(HeightError::HardwareRead("scripted close failure".into()));
        }
        Ok(())
    }
}
