#[cfg(target_os = "linux")]
mod linux;
mod mcp3008_source;

#[cfg(target_os = "linux")]
pub use linux::{open_spidev, spidev_options};
pub use mcp3008_source::{Mcp3008Source, command_frame, decode_frame};
