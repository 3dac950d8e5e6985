//! Command-line options for the `salvo` runner.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "salvo: headless color-matched combat runner\n\
\n\
Options:\n\
\n\
  --config <path>      Combat config JSON (default: built-in tuning)\n\
  --scenario <path>    Scenario JSON (default: built-in demo)\n\
  --ticks <N>          Ticks to run (default: the scenario's length)\n\
  --realtime           Pace ticks to wall-clock time instead of running flat out\n\
  --time-scale <X>     Speed multiplier for --realtime (default: 1.0)\n\
\n\
Logging honors RUST_LOG (default: info).\n";

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub scenario: Option<PathBuf>,
    pub ticks: Option<u64>,
    pub realtime: bool,
    pub time_scale: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: None,
            scenario: None,
            ticks: None,
            realtime: false,
            time_scale: 1.0,
        }
    }
}

impl RunOptions {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = || {
                iter.next()
                    .with_context(|| format!("missing value for {arg}"))
            };
            match arg.as_str() {
                "--config" => options.config = Some(PathBuf::from(value()?)),
                "--scenario" => options.scenario = Some(PathBuf::from(value()?)),
                "--ticks" => {
                    let raw = value()?;
                    let ticks: u64 = raw
                        .parse()
                        .with_context(|| format!("invalid tick count: {raw}"))?;
                    options.ticks = Some(ticks);
                }
                "--time-scale" => {
                    let raw = value()?;
                    let scale: f64 = raw
                        .parse()
                        .with_context(|| format!("invalid time scale: {raw}"))?;
                    if !(scale > 0.0 && scale.is_finite()) {
                        bail!("time scale must be positive, got {scale}");
                    }
                    options.time_scale = scale;
                }
                "--realtime" => options.realtime = true,
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(options)
    }
}
