//! Height sensor driver for the GPR-20 robot.
//!
//! Glues the pieces together: a batch of 30 reads from the MCP3008, each
//! converted to meters, is trimmed of outliers and averaged into one height.
//!
//! # Resource lifetime
//! The driver owns its [`SampleSource`] from construction on and closes it
//! exactly once: either through [`HeightDriver::close`] or when the driver is
//! dropped. A source handed to a constructor that then fails is closed before
//! the error is returned.

use log::{debug, warn};

use crate::acquisition::SampleAcquirer;
use crate::config::{DriverConfig, build_source};
use crate::error::HeightError;
use crate::estimation::{ConvergenceResult, OutlierTrimEstimator};
use crate::sources::SampleSource;

pub struct HeightDriver {
    source: Box<dyn SampleSource>,
    acquirer: SampleAcquirer,
    estimator: OutlierTrimEstimator,
    closed: bool,
}

impl HeightDriver {
    pub fn new(
        mut source: Box<dyn SampleSource>,
        config: &DriverConfig,
    ) -> Result<Self, HeightError> {
        let parts = config
            .acquirer()
            .and_then(|a| config.estimator().map(|e| (a, e)));
        match parts {
            Ok((acquirer, estimator)) => Ok(Self::from_parts(source, acquirer, estimator)),
            Err(e) => {
                if let Err(close_err) = source.close() {
                    warn!("failed to close sample source after bad config: {close_err}");
                }
                Err(e)
            }
        }
    }

    /// Driver with the deployed settings: 30 samples, 5 ms apart, 5.3 V
    /// reference, 0.005 m threshold.
    pub fn with_defaults(source: Box<dyn SampleSource>) -> Self {
        Self::from_parts(
            source,
            SampleAcquirer::default(),
            OutlierTrimEstimator::default(),
        )
    }

    /// Opens the backend named in `config`.
    pub fn from_config(config: &DriverConfig) -> Result<Self, HeightError> {
        config.validate()?;
        let source = build_source(&config.backend)?;
        Self::new(source, config)
    }

    pub fn from_parts(
        source: Box<dyn SampleSource>,
        acquirer: SampleAcquirer,
        estimator: OutlierTrimEstimator,
    ) -> Self {
        Self {
            source,
            acquirer,
            estimator,
            closed: false,
        }
    }

    pub fn acquirer(&self) -> &SampleAcquirer {
        &self.acquirer
    }

    pub fn estimator(&self) -> &OutlierTrimEstimator {
        &self.estimator
    }

    /// Takes one full measurement and returns the trimmed mean, in meters.
    ///
    /// Blocks for the whole acquisition (at least 145 ms with defaults).
    pub fn take_measurement(&mut self) -> Result<f64, HeightError> {
        self.measure().map(|r| r.mean)
    }

    /// Like [`take_measurement`](Self::take_measurement), with trimming details.
    pub fn measure(&mut self) -> Result<ConvergenceResult, HeightError> {
        let batch = self.acquirer.acquire_batch(self.source.as_mut())?;
        debug!("batch: {batch}");
        self.estimator.estimate(batch.as_slice())
    }

    /// Closes the source now and reports how that went.
    pub fn close(mut self) -> Result<(), HeightError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), HeightError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.source.close()
    }
}

impl Drop for HeightDriver {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("failed to close sample source: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendChoice, SimulatedParameters};
    use crate::core::convert;
    use crate::testing::ScriptedSource;
    use approx::assert_abs_diff_eq;

    fn fast_config() -> DriverConfig {
        DriverConfig {
            sample_interval_ms: 0,
            ..DriverConfig::default()
        }
    }

    #[test]
    fn constant_input_measures_its_own_distance() {
        let source = ScriptedSource::constant(512);
        let mut driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();
        let height = driver.take_measurement().unwrap();
        assert_abs_diff_eq!(height, convert(512, 5.3), epsilon = 1e-12);
    }

    #[test]
    fn spikes_are_trimmed_away() {
        // 28 steady reads and two glitches
        let mut counts = vec![400u16; 30];
        counts[3] = 1000;
        counts[20] = 5;
        let source = ScriptedSource::new(counts);
        let mut driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();

        let r = driver.measure().unwrap();
        assert_abs_diff_eq!(r.mean, convert(400, 5.3), epsilon = 1e-12);
        assert_eq!(r.retained, 28);
        assert_eq!(r.iterations, 2);
        // the zero-ish count maps to the largest distance and goes first
        assert_eq!(r.removed[0], convert(5, 5.3));
    }

    #[test]
    fn fifteenth_read_failure_fails_the_measurement() {
        let source = ScriptedSource::constant(512).failing_on_read(15);
        let spy = source.spy();
        let mut driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();

        let err = driver.take_measurement().unwrap_err();
        assert!(matches!(err, HeightError::HardwareRead(_)));
        assert_eq!(spy.reads(), 15);
    }

    #[test]
    fn drop_closes_exactly_once() {
        let source = ScriptedSource::constant(512);
        let spy = source.spy();
        {
            let mut driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();
            driver.take_measurement().unwrap();
            driver.take_measurement().unwrap();
            assert_eq!(spy.closes(), 0);
        }
        assert_eq!(spy.closes(), 1);
        assert_eq!(spy.reads(), 60);
    }

    #[test]
    fn explicit_close_is_not_repeated_on_drop() {
        let source = ScriptedSource::constant(512);
        let spy = source.spy();
        let driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();
        driver.close().unwrap();
        assert_eq!(spy.closes(), 1);
    }

    #[test]
    fn close_failure_is_reported_once() {
        let source = ScriptedSource::constant(512).failing_on_close();
        let spy = source.spy();
        let driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();
        assert!(driver.close().is_err());
        assert_eq!(spy.closes(), 1);
    }

    #[test]
    fn source_is_closed_after_measurement_error() {
        let source = ScriptedSource::constant(512).failing_on_read(1);
        let spy = source.spy();
        {
            let mut driver = HeightDriver::new(Box::new(source), &fast_config()).unwrap();
            assert!(driver.take_measurement().is_err());
        }
        assert_eq!(spy.closes(), 1);
    }

    #[test]
    fn bad_config_still_closes_the_source() {
        let source = ScriptedSource::constant(512);
        let spy = source.spy();
        let config = DriverConfig {
            sample_count: 0,
            ..DriverConfig::default()
        };
        let err = HeightDriver::new(Box::new(source), &config).err().unwrap();
        assert!(matches!(err, HeightError::InvalidConfig(_)));
        assert_eq!(spy.closes(), 1);
    }

    #[test]
    fn defaults_follow_the_deployed_driver() {
        let driver = HeightDriver::with_defaults(Box::new(ScriptedSource::constant(1)));
        assert_eq!(driver.acquirer().count(), 30);
        assert_eq!(driver.estimator().threshold(), 0.005);
    }

    #[test]
    fn simulated_backend_from_config_is_repeatable() {
        let config = DriverConfig {
            sample_interval_ms: 0,
            backend: BackendChoice::Simulated(SimulatedParameters { seed: 2024 }),
            ..DriverConfig::default()
        };
        let a = HeightDriver::from_config(&config).unwrap().measure().unwrap();
        let b = HeightDriver::from_config(&config).unwrap().measure().unwrap();
        assert_eq!(a, b);
        assert!(a.retained >= 1 && a.retained <= 30);
        assert_eq!(a.retained + a.iterations, 30);
    }
}
