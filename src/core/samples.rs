use std::fmt::{Display, Formatter};

use crate::core::statistics;

/// One converter read.
pub type RawSample = u16;

/// One converted reading, in meters.
pub type DistanceSample = f64;

/// Upper bound of a raw count. Real MCP3008 reads stop at 1023; the
/// simulated backend draws up to and including this value.
pub const MAX_COUNT: RawSample = 1024;

/// Ordered batch of distance samples from one acquisition cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    samples: Vec<DistanceSample>,
}

impl SampleBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, sample: DistanceSample) {
        self.samples.push(sample);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DistanceSample] {
        &self.samples
    }

    pub fn mean(&self) -> Option<f64> {
        statistics::mean(&self.samples)
    }

    pub fn std_dev(&self) -> Option<f64> {
        statistics::population_std_dev(&self.samples)
    }
}

impl Display for SampleBatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.samples.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s:.4}")?;
        }
        write!(f, "]")
    }
}
