use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::acquisition::MAX_SAMPLE_COUNT;
use crate::config::backend_choice::{DEFAULT_SEED, DEFAULT_SPI_DEVICE, DEFAULT_SPI_SPEED_HZ};
use crate::config::{BackendChoice, BackendKind, DriverConfig, Mcp3008Parameters, SimulatedParameters};
use crate::sources::ChannelId;
use crate::ui::cli::drivers::PromptDriver;

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";
const SELECT_HELP: &str = "↑/↓ to navigate, ↵ to select";

fn channel_label(channel: ChannelId) -> String {
    let wiring = if channel.is_single_ended() {
        "single-ended"
    } else {
        "differential"
    };
    format!("{channel}  {DIM_ITALIC}{wiring}{RESET}")
}

fn kind_label(kind: BackendKind) -> String {
    let label = kind.get_message().unwrap_or_else(|| kind.into());
    match kind.get_detailed_message() {
        Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
        _ => label.to_string(),
    }
}

/// Walks the user through building a [`DriverConfig`].
pub fn prompt_config<D: PromptDriver>(driver: &D) -> Result<DriverConfig> {
    let defaults = DriverConfig::default();

    let kinds: Vec<BackendKind> = BackendKind::iter().collect();
    let picked = driver.ask_select(
        "Choose a sample source:",
        SELECT_HELP,
        kinds.iter().copied().map(kind_label).collect(),
    )?;
    let kind = *kinds.get(picked).context("sample source selection out of range")?;

    let backend = match kind {
        BackendKind::Simulated => BackendChoice::Simulated(SimulatedParameters {
            seed: driver.ask_u64("Seed", "PRNG seed", DEFAULT_SEED, None, None)?,
        }),
        BackendKind::Mcp3008 => {
            let device = prompt_device_until_ok(driver)?;
            let speed_hz = driver.ask_u64(
                "SPI Clock",
                "SPI clock in Hz",
                u64::from(DEFAULT_SPI_SPEED_HZ),
                Some(1),
                Some(u64::from(u32::MAX)),
            )?;
            BackendChoice::Mcp3008(Mcp3008Parameters {
                device,
                speed_hz: u32::try_from(speed_hz).context("SPI clock does not fit in 32 bits")?,
            })
        }
    };

    let channels: Vec<ChannelId> = ChannelId::iter().collect();
    let default_channel = channels
        .iter()
        .position(|c| *c == defaults.channel)
        .unwrap_or(0);
    let mut labels: Vec<String> = channels.iter().copied().map(channel_label).collect();
    labels.rotate_left(default_channel);
    let picked = driver.ask_select(
        "Sensor channel:",
        "MCP3008 input the sensor is wired to",
        labels,
    )?;
    let channel = *channels
        .get((picked + default_channel) % channels.len())
        .context("channel selection out of range")?;

    let sample_count = driver.ask_u64(
        "Sample Count",
        "Converter reads per measurement",
        defaults.sample_count as u64,
        Some(1),
        Some(MAX_SAMPLE_COUNT as u64),
    )?;
    let sample_interval_ms = driver.ask_u64(
        "Sample Interval",
        "Milliseconds to wait between consecutive reads",
        defaults.sample_interval_ms,
        None,
        None,
    )?;
    let std_dev_threshold = driver.ask_f64(
        "Std. Dev. Threshold",
        "Population standard deviation (m) under which trimming stops",
        defaults.std_dev_threshold,
        Some(f64::MIN_POSITIVE),
        None,
    )?;
    let reference_voltage = driver.ask_f64(
        "Reference Voltage",
        "Full-scale voltage used to normalize converter counts",
        defaults.reference_voltage,
        Some(f64::MIN_POSITIVE),
        None,
    )?;

    let config = DriverConfig {
        sample_count: usize::try_from(sample_count).context("sample count too large")?,
        sample_interval_ms,
        std_dev_threshold,
        reference_voltage,
        channel,
        backend,
    };
    config
        .validate()
        .context("the answers do not form a valid configuration")?;
    Ok(config)
}

fn validate_device_str(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);
    if !p.exists() {
        return Err(format!("Device does not exist: {}", p.display()));
    }
    if p.is_dir() {
        return Err("Expected a device file, not a directory".into());
    }
    Ok(())
}

fn prompt_device_until_ok<D: PromptDriver>(driver: &D) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(
            "SPI Device",
            "spidev character device the MCP3008 is wired to",
            DEFAULT_SPI_DEVICE,
        )?;
        match validate_device_str(&answer) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}
