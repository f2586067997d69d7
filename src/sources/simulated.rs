use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{MAX_COUNT, RawSample, convert};
use crate::error::HeightError;
use crate::sources::{ChannelId, SampleSource};

/// Reference voltage used only for the per-sample debug line.
const DEBUG_REFERENCE_VOLTAGE: f64 = 5.0;

/// Stand-in for the MCP3008 when no hardware is attached.
///
/// Every requested channel yields a count drawn uniformly from
/// `0..=MAX_COUNT`. The sequence is fully determined by the seed.
#[derive(Debug)]
pub struct SimulatedSource {
    seed: u64,
    rng: StdRng,
    closed: bool,
    produced: u64,
}

impl SimulatedSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            closed: false,
            produced: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total counts handed out since construction or the last restart.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Re-seeds the generator so the same counts come out again.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
    }
}

impl SampleSource for SimulatedSource {
    fn read(
        &mut self,
        channels: &[ChannelId],
        _reference_voltage: f64,
    ) -> Result<Vec<RawSample>, HeightError> {
        if self.closed {
            return Err(HeightError::HardwareRead(
                "simulated converter is closed".into(),
            ));
        }

        let mut reading = Vec::with_capacity(channels.len());
        for channel in channels {
            let raw: RawSample = self.rng.random_range(0..=MAX_COUNT);
            let distance = convert(raw, DEBUG_REFERENCE_VOLTAGE);
            debug!(
                "{channel}: analog value {raw}, equivalent to {distance:.6} m ({DEBUG_REFERENCE_VOLTAGE}V)"
            );
            reading.push(raw);
        }
        self.produced += reading.len() as u64;
        Ok(reading)
    }

    fn close(&mut self) -> Result<(), HeightError> {
        if !self.closed {
            self.closed = true;
            info!("simulated converter connection closed");
        }
        Ok(())
    }
}
