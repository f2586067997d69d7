use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

use gpr_height::config::DriverConfig;
use gpr_height::driver::HeightDriver;
use gpr_height::ui::cli::drivers::InquireDriver;
use gpr_height::ui::cli::wizard::prompt_config;

/// Measures the GPR-20 height above ground
#[derive(Parser, Debug, PartialEq)]
#[command(name = "gpr-height")]
#[command(about = "Reads the IR height sensor and prints trimmed height measurements")]
#[command(version)]
struct Args {
    /// Driver config (JSON); the interactive wizard runs when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of measurements to take
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u64,

    /// Print the JSON schema of the config file and exit
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.schema {
        println!("{}", serde_json::to_string_pretty(&DriverConfig::schema())?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => prompt_config(&InquireDriver)?,
    };

    let mut driver = HeightDriver::from_config(&config).context("failed to open sample source")?;
    info!(
        "taking {} measurement(s) of {} samples each",
        args.count,
        driver.acquirer().count()
    );

    for i in 1..=args.count {
        let result = driver
            .measure()
            .with_context(|| format!("measurement {i} failed"))?;
        println!(
            "{}  {result}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        );
    }

    driver.close().context("failed to close sample source")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_one_measurement() {
        let a = Args::try_parse_from(["gpr-height"]).unwrap();
        assert_eq!(
            a,
            Args {
                config: None,
                count: 1,
                schema: false
            }
        );
    }

    #[test]
    fn reads_every_flag() {
        let a =
            Args::try_parse_from(["gpr-height", "--config", "height.json", "-n", "5", "--schema"])
                .unwrap();
        assert_eq!(a.config, Some(PathBuf::from("height.json")));
        assert_eq!(a.count, 5);
        assert!(a.schema);

        let short = Args::try_parse_from(["gpr-height", "-c", "height.json"]).unwrap();
        assert_eq!(short.config, Some(PathBuf::from("height.json")));
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Args::try_parse_from(["gpr-height", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn rejects_bad_input() {
        for argv in [
            vec!["gpr-height", "--count"],
            vec!["gpr-height", "--count", "many"],
            vec!["gpr-height", "--config"],
            vec!["gpr-height", "--verbose"],
        ] {
            let err = Args::try_parse_from(argv.iter().copied()).unwrap_err();
            assert_ne!(err.exit_code(), 0, "{argv:?}");
        }
    }
}
