use libm::sqrt;

/// Population mean and standard deviation of a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

/// Arithmetic mean, `None` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    summarize(values).map(|s| s.std_dev)
}

pub fn summarize(values: &[f64]) -> Option<Summary> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(Summary {
        mean,
        std_dev: sqrt(variance),
    })
}

/// Index of the value farthest from `center`.
///
/// Forward scan with a strict comparison, so the lowest index wins ties.
pub fn farthest_from(values: &[f64], center: f64) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut far_idx = 0;
    let mut far_delta = 0.0;
    for (idx, v) in values.iter().enumerate() {
        let delta = (v - center).abs();
        if delta > far_delta {
            far_idx = idx;
            far_delta = delta;
        }
    }
    Some(far_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_has_no_statistics() {
        assert!(mean(&[]).is_none());
        assert!(population_std_dev(&[]).is_none());
        assert!(farthest_from(&[], 0.0).is_none());
    }

    #[test]
    fn population_not_sample_divisor() {
        // sample std-dev of [1, 3] would be sqrt(2); population is 1
        let s = summarize(&[1.0, 3.0]).unwrap();
        assert_abs_diff_eq!(s.mean, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let s = summarize(&[0.42]).unwrap();
        assert_eq!(s.mean, 0.42);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn farthest_prefers_lowest_index_on_ties() {
        // 0.0 and 2.0 are both 1.0 away from 1.0
        assert_eq!(farthest_from(&[0.0, 1.0, 2.0], 1.0), Some(0));
        assert_eq!(farthest_from(&[1.0, 2.0, 0.0], 1.0), Some(1));
        assert_eq!(farthest_from(&[1.0, 1.0, 1.0], 1.0), Some(0));
    }

    #[test]
    fn farthest_finds_the_outlier() {
        let values = [0.50, 0.51, 0.49, 0.50, 5.00];
        let m = mean(&values).unwrap();
        assert_eq!(farthest_from(&values, m), Some(4));
    }
}
