use std::fmt::{Display, Formatter, Result};

/// Outcome of one outlier-trimming run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceResult {
    /// Mean of the surviving samples, in meters.
    pub mean: f64,
    /// Population standard deviation of the surviving samples.
    pub std_dev: f64,
    /// Number of samples left when trimming stopped.
    pub retained: usize,
    /// Number of removals performed.
    pub iterations: usize,
    /// Removed values, in removal order.
    pub removed: Vec<f64>,
}

impl Display for ConvergenceResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "height={:.4} m, std_dev={:.6}, retained={}, iterations={}",
            self.mean, self.std_dev, self.retained, self.iterations
        )
    }
}
