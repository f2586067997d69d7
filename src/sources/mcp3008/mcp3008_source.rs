//! MCP3008 10-bit converter over SPI.
//!
//! Each conversion is a 3 byte exchange:
//!
//! ```text
//! tx: 0000_0001  MMMM_0000  xxxx_xxxx      start bit, 4-bit mode
//! rx: xxxx_xxxx  xxxx_x0BB  BBBB_BBBB      null bit, 10-bit result
//! ```

use embedded_hal::spi::SpiDevice;
use log::info;

use crate::core::RawSample;
use crate::error::HeightError;
use crate::sources::{ChannelId, SampleSource};

const START_BIT: u8 = 0x01;

#[inline]
pub fn command_frame(channel: ChannelId) -> [u8; 3] {
    [START_BIT, channel.mode() << 4, 0x00]
}

#[inline]
pub fn decode_frame(rx: &[u8; 3]) -> RawSample {
    (RawSample::from(rx[1] & 0x03) << 8) | RawSample::from(rx[2])
}

/// MCP3008 behind any `embedded-hal` SPI device. The device owns chip
/// select; closing drops it.
pub struct Mcp3008Source<D: SpiDevice> {
    device: Option<D>,
}

impl<D: SpiDevice> Mcp3008Source<D> {
    pub fn new(device: D) -> Self {
        Self {
            device: Some(device),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.device.is_none()
    }
}

impl<D: SpiDevice> SampleSource for Mcp3008Source<D> {
    fn read(
        &mut self,
        channels: &[ChannelId],
        _reference_voltage: f64,
    ) -> Result<Vec<RawSample>, HeightError> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| HeightError::HardwareRead("MCP3008 connection is closed".into()))?;

        let mut reading = Vec::with_capacity(channels.len());
        for &channel in channels {
            let mut frame = command_frame(channel);
            device.transfer_in_place(&mut frame).map_err(|e| {
                HeightError::HardwareRead(format!("SPI transfer on {channel} failed: {e:?}"))
            })?;
            reading.push(decode_frame(&frame));
        }
        Ok(reading)
    }

    fn close(&mut self) -> Result<(), HeightError> {
        if self.device.take().is_some() {
            info!("MCP3008 connection closed");
        }
        Ok(())
    }
}
