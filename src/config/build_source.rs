use log::info;

use crate::config::BackendChoice;
use crate::error::HeightError;
use crate::sources::{SampleSource, SimulatedSource};

/// Opens the converter a config asks for.
pub fn build_source(choice: &BackendChoice) -> Result<Box<dyn SampleSource>, HeightError> {
    match choice {
        BackendChoice::Simulated(p) => {
            info!("using simulated converter (seed {})", p.seed);
            Ok(Box::new(SimulatedSource::new(p.seed)))
        }
        BackendChoice::Mcp3008(p) => open_mcp3008(&p.device, p.speed_hz),
    }
}

#[cfg(target_os = "linux")]
fn open_mcp3008(
    device: &std::path::Path,
    speed_hz: u32,
) -> Result<Box<dyn SampleSource>, HeightError> {
    use crate::sources::{Mcp3008Source, open_spidev};

    let spi = open_spidev(device, speed_hz)?;
    info!("using MCP3008 on {} at {speed_hz} Hz", device.display());
    Ok(Box::new(Mcp3008Source::new(spi)))
}

#[cfg(not(target_os = "linux"))]
fn open_mcp3008(
    device: &std::path::Path,
    _speed_hz: u32,
) -> Result<Box<dyn SampleSource>, HeightError> {
    Err(HeightError::InvalidConfig(format!(
        "spidev backend ({}) is only available on Linux",
        device.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::backend_choice::{Mcp3008Parameters, SimulatedParameters};
    use crate::sources::ChannelId;
    use std::path::PathBuf;

    #[test]
    fn simulated_backend_reads() {
        let mut source =
            build_source(&BackendChoice::Simulated(SimulatedParameters { seed: 5 })).unwrap();
        let raw = source.read_channel(ChannelId::Ch0, 5.3).unwrap();
        assert!(raw <= crate::core::MAX_COUNT);
        source.close().unwrap();
    }

    #[test]
    fn missing_spi_device_does_not_fall_back() {
        let choice = BackendChoice::Mcp3008(Mcp3008Parameters {
            device: PathBuf::from("/dev/definitely-not-a-spidev"),
            speed_hz: 1_000_000,
        });
        assert!(build_source(&choice).is_err());
    }
}
