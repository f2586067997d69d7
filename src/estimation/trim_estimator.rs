use log::debug;

use crate::error::HeightError;
use crate::estimation::{ConvergenceResult, trim_steps};

/// Spread (meters) under which a batch counts as converged.
pub const DEFAULT_STD_DEV_THRESHOLD: f64 = 0.005;

/// Collapses a batch of noisy distances into one robust mean.
///
/// While the batch's population standard deviation is at or above the
/// threshold, the sample farthest from the current mean is dropped (lowest
/// index on ties) and the statistics are recomputed. There is no floor on
/// how many samples survive: a very noisy batch may be trimmed down to a
/// single reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierTrimEstimator {
    threshold: f64,
}

impl OutlierTrimEstimator {
    /// Fails with [`HeightError::InvalidConfig`] unless `threshold` is finite
    /// and strictly positive.
    pub fn new(threshold: f64) -> Result<Self, HeightError> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(HeightError::InvalidConfig(format!(
                "std_dev threshold must be finite and > 0, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn estimate(&self, samples: &[f64]) -> Result<ConvergenceResult, HeightError> {
        if samples.is_empty() {
            return Err(HeightError::InvalidInput(
                "cannot estimate from an empty sample batch".into(),
            ));
        }

        let mut removed = Vec::new();
        for step in trim_steps(samples, self.threshold) {
            if let Some(removal) = step.removed {
                removed.push(removal.value);
                continue;
            }
            debug!(
                "converged on {:.4} m after {} removals ({} of {} samples kept, std_dev={:.6})",
                step.mean,
                removed.len(),
                step.len,
                samples.len(),
                step.std_dev
            );
            return Ok(ConvergenceResult {
                mean: step.mean,
                std_dev: step.std_dev,
                retained: step.len,
                iterations: removed.len(),
                removed,
            });
        }

        Err(HeightError::InvalidInput(
            "trimming stopped without converging".into(),
        ))
    }
}

impl Default for OutlierTrimEstimator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STD_DEV_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_non_positive_thresholds() {
        for bad in [0.0, -0.005, f64::NAN, f64::INFINITY] {
            let err = OutlierTrimEstimator::new(bad).unwrap_err();
            assert!(matches!(err, HeightError::InvalidConfig(_)), "bad={bad}");
        }
        assert_eq!(OutlierTrimEstimator::new(0.01).unwrap().threshold(), 0.01);
        assert_eq!(
            OutlierTrimEstimator::default().threshold(),
            DEFAULT_STD_DEV_THRESHOLD
        );
    }

    #[test]
    fn empty_batch_is_invalid_input() {
        let err = OutlierTrimEstimator::default().estimate(&[]).unwrap_err();
        assert!(matches!(err, HeightError::InvalidInput(_)));
    }

    #[test]
    fn identical_samples_need_no_trimming() {
        let r = OutlierTrimEstimator::default()
            .estimate(&[0.30, 0.30, 0.30])
            .unwrap();
        assert_abs_diff_eq!(r.mean, 0.30, epsilon = 1e-12);
        assert_eq!(r.iterations, 0);
        assert_eq!(r.retained, 3);
        assert!(r.removed.is_empty());
    }

    #[test]
    fn drops_the_gross_outlier_first() {
        let r = OutlierTrimEstimator::default()
            .estimate(&[0.50, 0.51, 0.49, 0.50, 5.00])
            .unwrap();
        assert_eq!(r.removed[0], 5.00);
        // 0.51 and 0.49 tie on the second pass; the earlier one goes
        assert_eq!(r.removed, vec![5.00, 0.51]);
        assert_eq!(r.iterations, 2);
        assert_eq!(r.retained, 3);
        assert!(r.std_dev < DEFAULT_STD_DEV_THRESHOLD);
        assert_abs_diff_eq!(r.mean, 0.496_666_666, epsilon = 1e-6);
    }

    #[test]
    fn threshold_compares_strictly() {
        // population std-dev of [0, 0.01] is exactly 0.005
        let r = OutlierTrimEstimator::new(0.005)
            .unwrap()
            .estimate(&[0.0, 0.01])
            .unwrap();
        assert_eq!(r.iterations, 1);
        assert_eq!(r.retained, 1);
        assert_eq!(r.mean, 0.01);
    }

    #[test]
    fn single_sample_is_its_own_estimate() {
        let r = OutlierTrimEstimator::default().estimate(&[0.77]).unwrap();
        assert_eq!(r.mean, 0.77);
        assert_eq!(r.std_dev, 0.0);
        assert_eq!(r.retained, 1);
        assert_eq!(r.iterations, 0);
    }

    #[test]
    fn very_noisy_batch_can_end_with_one_sample() {
        let samples = [0.1, 0.4, 0.9, 1.6, 2.5];
        let r = OutlierTrimEstimator::default().estimate(&samples).unwrap();
        assert_eq!(r.retained, 1);
        assert_eq!(r.iterations, samples.len() - 1);
    }

    #[test]
    fn display_is_one_line() {
        let r = OutlierTrimEstimator::default().estimate(&[0.25]).unwrap();
        assert_eq!(
            format!("{r}"),
            "height=0.2500 m, std_dev=0.000000, retained=1, iterations=0"
        );
    }
}
