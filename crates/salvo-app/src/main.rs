use std::sync::mpsc;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use salvo_app::game_loop::{spawn_combat_loop, LoopSettings, Pacing};
use salvo_app::options::{RunOptions, USAGE};
use salvo_core::config::CombatConfig;
use salvo_sim::scenario::Scenario;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprint!("{USAGE}");
        return Ok(());
    }
    let options = RunOptions::parse(&args).context("invalid arguments, see --help")?;

    let config = match &options.config {
        Some(path) => CombatConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CombatConfig::default(),
    };
    let scenario = match &options.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::demo(),
    };

    let max_ticks = options.ticks.unwrap_or(scenario.ticks);
    let pacing = if options.realtime {
        Pacing::RealTime {
            time_scale: options.time_scale,
        }
    } else {
        Pacing::AsFastAsPossible
    };
    info!(
        "running scenario '{}' for {max_ticks} ticks at {} Hz",
        scenario.name, config.tick_rate
    );

    let (snap_tx, snap_rx) = mpsc::channel();
    let (cmd_tx, handle) = spawn_combat_loop(
        LoopSettings {
            config,
            scenario,
            max_ticks,
            pacing,
        },
        Some(snap_tx),
    )
    .context("spawning combat loop")?;

    for snapshot in snap_rx.iter() {
        for event in &snapshot.events {
            debug!("t={} {}", snapshot.time.tick, serde_json::to_string(event)?);
        }
    }
    drop(cmd_tx);

    let summary = handle
        .join()
        .map_err(|_| anyhow!("combat loop thread panicked"))?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
