use std::path::Path;

use linux_embedded_hal::SpidevDevice;
use log::debug;
use spidev::{SpiModeFlags, Spidev, SpidevOptions};

use crate::error::HeightError;

const BITS_PER_WORD: u8 = 8;

/// Bus settings the MCP3008 needs: mode 0, MSB first, 8-bit words.
pub fn spidev_options(speed_hz: u32) -> SpidevOptions {
    SpidevOptions::new()
        .bits_per_word(BITS_PER_WORD)
        .max_speed_hz(speed_hz)
        .lsb_first(false)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build()
}

/// Opens a Linux `spidev` character device, e.g. `/dev/spidev0.0`, and
/// configures it for the MCP3008.
///
/// The mode is always written, whatever the device was last left in.
pub fn open_spidev<P: AsRef<Path>>(path: P, speed_hz: u32) -> Result<SpidevDevice, HeightError> {
    let path = path.as_ref();
    if speed_hz == 0 {
        return Err(HeightError::InvalidConfig("SPI clock must be > 0 Hz".into()));
    }
    let mut spi = Spidev::open(path)?;
    spi.configure(&spidev_options(speed_hz))?;
    debug!("opened {} in SPI mode 0 at {speed_hz} Hz", path.display());
    Ok(SpidevDevice(spi))
}
