use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev0.0";
pub const DEFAULT_SPI_SPEED_HZ: u32 = 1_000_000;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_device() -> PathBuf {
    PathBuf::from(DEFAULT_SPI_DEVICE)
}

fn default_speed_hz() -> u32 {
    DEFAULT_SPI_SPEED_HZ
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimulatedParameters {
    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed for the simulated converter")]
    pub seed: u64,
}

impl Default for SimulatedParameters {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Mcp3008Parameters {
    #[serde(default = "default_device")]
    #[schemars(
        with = "String",
        title = "SPI Device",
        description = "spidev character device the MCP3008 is wired to",
        extend("format" = "path")
    )]
    pub device: PathBuf,

    #[serde(default = "default_speed_hz")]
    #[schemars(
        title = "SPI Clock",
        description = "SPI clock in Hz",
        range(min = 1)
    )]
    pub speed_hz: u32,
}

impl Default for Mcp3008Parameters {
    fn default() -> Self {
        Self {
            device: default_device(),
            speed_hz: DEFAULT_SPI_SPEED_HZ,
        }
    }
}

/// Which converter backs the driver. Chosen explicitly; there is no
/// fallback from hardware to simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(BackendKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum BackendChoice {
    #[strum_discriminants(strum(
        message = "Simulated",
        detailed_message = "Random converter counts from a seeded generator."
    ))]
    Simulated(SimulatedParameters),

    #[strum_discriminants(strum(
        message = "MCP3008 over SPI",
        detailed_message = "Reads a real MCP3008 through a Linux spidev device."
    ))]
    Mcp3008(Mcp3008Parameters),
}

impl BackendChoice {
    pub fn kind(&self) -> BackendKind {
        BackendKind::from(self)
    }
}
