use crate::core::RawSample;
use crate::error::HeightError;
use crate::sources::ChannelId;

/// Pull-based access to an analog-to-digital converter.
///
/// A source is a stateful handle on a hardware (or simulated) resource. It
/// is owned by exactly one driver, which calls [`close`] once when it is done
/// with it.
pub trait SampleSource {
    /// Reads one raw count per requested channel, in request order.
    ///
    /// `reference_voltage` is the full-scale voltage the caller will
    /// normalize counts with; sources may use it for diagnostics but always
    /// return raw counts.
    ///
    /// Returns [`HeightError::HardwareRead`] when the device cannot produce
    /// a sample. Implementations must not retry on their own.
    fn read(
        &mut self,
        channels: &[ChannelId],
        reference_voltage: f64,
    ) -> Result<Vec<RawSample>, HeightError>;

    /// Releases the underlying resource.
    ///
    /// Calling it a second time must be harmless.
    fn close(&mut self) -> Result<(), HeightError>;

    /// Reads a single channel.
    ///
    /// A response that does not hold exactly one count is reported as a
    /// hardware read failure.
    fn read_channel(
        &mut self,
        channel: ChannelId,
        reference_voltage: f64,
    ) -> Result<RawSample, HeightError> {
        let counts = self.read(&[channel], reference_voltage)?;
        match counts.as_slice() {
            [raw] => Ok(*raw),
            other => Err(HeightError::HardwareRead(format!(
                "expected 1 count from {channel}, got {}",
                other.len()
            ))),
        }
    }
}
