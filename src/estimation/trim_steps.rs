use crate::core::statistics::{self, Summary};

/// One sample dropped during trimming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    /// Position in the batch as it was before this removal.
    pub index: usize,
    pub value: f64,
}

/// State of the batch at one trimming iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimStep {
    pub mean: f64,
    pub std_dev: f64,
    /// Batch size the statistics were computed over.
    pub len: usize,
    /// `None` on the final, converged step.
    pub removed: Option<Removal>,
}

/// Iterator over the trimming process.
///
/// Yields one step per iteration; the last step has `removed == None` and
/// carries the converged statistics. A batch shrinks by exactly one sample
/// per non-final step, and a batch of one sample always converges, so the
/// iterator yields at most `n` items.
#[derive(Debug, Clone)]
pub struct TrimSteps {
    batch: Vec<f64>,
    threshold: f64,
    finished: bool,
}

pub fn trim_steps(samples: &[f64], threshold: f64) -> TrimSteps {
    TrimSteps {
        batch: samples.to_vec(),
        threshold,
        finished: samples.is_empty(),
    }
}

impl TrimSteps {
    /// Samples still in the batch.
    pub fn remaining(&self) -> &[f64] {
        &self.batch
    }
}

impl Iterator for TrimSteps {
    type Item = TrimStep;

    fn next(&mut self) -> Option<TrimStep> {
        if self.finished {
            return None;
        }
        let Summary { mean, std_dev } = statistics::summarize(&self.batch)?;
        let len = self.batch.len();

        // a single sample has no spread; never trim the batch empty
        if len < 2 || std_dev < self.threshold {
            self.finished = true;
            return Some(TrimStep {
                mean,
                std_dev,
                len,
                removed: None,
            });
        }

        let index = statistics::farthest_from(&self.batch, mean)?;
        let value = self.batch.remove(index);
        Some(TrimStep {
            mean,
            std_dev,
            len,
            removed: Some(Removal { index, value }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (1, Some(self.batch.len()))
        }
    }
}
