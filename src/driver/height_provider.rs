use crate::driver::HeightDriver;
use crate::error::HeightError;

/// The "get current height" operation a service layer exposes.
///
/// Takes no arguments and yields one distance in meters. Errors are meant to
/// be turned into a failed response by the caller, never into a default value.
pub trait HeightProvider {
    fn get_height(&mut self) -> Result<f64, HeightError>;
}

impl HeightProvider for HeightDriver {
    fn get_height(&mut self) -> Result<f64, HeightError> {
        self.take_measurement()
    }
}
