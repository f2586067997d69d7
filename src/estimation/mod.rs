mod convergence;
mod trim_estimator;
mod trim_steps;

pub use convergence::ConvergenceResult;
pub use trim_estimator::{DEFAULT_STD_DEV_THRESHOLD, OutlierTrimEstimator};
pub use trim_steps::{Removal, TrimStep, TrimSteps, trim_steps};
