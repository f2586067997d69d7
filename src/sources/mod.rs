mod channel;
pub mod mcp3008;
mod sample_source;
mod simulated;

pub use channel::ChannelId;
pub use mcp3008::Mcp3008Source;
pub use sample_source::SampleSource;
pub use simulated::SimulatedSource;

#[cfg(target_os = "linux")]
pub use mcp3008::open_spidev;
