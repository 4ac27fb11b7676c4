//! Skyguard headless harness
//!
//! Drives the simulation at its fixed cadence with the demo autopilot,
//! logging every status message. Rendering and real input are out of scope
//! here; this is the outer loop that a windowed front end would replace.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use skyguard::SimConfig;
use skyguard::autopilot::Autopilot;
use skyguard::sim::{GamePhase, GameState};

#[derive(Parser, Debug)]
#[command(name = "skyguard")]
#[command(about = "Run the Skyguard simulation headless with the demo autopilot")]
struct Cli {
    /// RNG seed (defaults to the config's seed, then the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// JSON config file with simulation tunables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sleep between ticks to run at wall-clock speed
    #[arg(long)]
    realtime: bool,
    /// Start a new game after each game over instead of stopping
    #[arg(long)]
    auto_restart: bool,
    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let seed = cli.seed.or(config.seed).unwrap_or_else(clock_seed);
    config.seed = Some(seed);

    let dt = config.tick_duration;
    let frame = Duration::from_secs_f32(dt);
    log::info!("Starting run: seed={} ticks={} dt={}s", seed, cli.ticks, dt);

    let mut state = GameState::with_config(config).context("invalid simulation config")?;
    let mut pilot = Autopilot::new(cli.auto_restart);
    let mut reported = 0u64;
    let mut games = 1u32;

    for _ in 0..cli.ticks {
        let started = Instant::now();
        let was_over = state.phase == GamePhase::GameOver;

        let input = pilot.next_input(&state.snapshot());
        state.advance(dt, &input);

        // Relay the messages pushed this tick, oldest first
        let fresh = (state.notifications.pushed() - reported) as usize;
        let mut messages: Vec<&str> = state.notifications().take(fresh).collect();
        messages.reverse();
        for msg in messages {
            log::info!("[tick {}] {}", state.time_ticks, msg);
        }
        reported = state.notifications.pushed();

        if was_over && state.phase == GamePhase::Playing {
            games += 1;
        }
        if state.quit_requested() {
            break;
        }
        if state.phase == GamePhase::GameOver && !cli.auto_restart {
            break;
        }

        if cli.realtime {
            thread::sleep(frame.saturating_sub(started.elapsed()));
        }
    }

    let snap = state.snapshot();
    if cli.json {
        let json = serde_json::to_string_pretty(&snap).context("failed to encode snapshot")?;
        println!("{json}");
    } else {
        println!(
            "seed {} | games {} | {:?} | score {} | level {} | lives {} | kills {}/{} | {:.1}s simulated",
            seed,
            games,
            snap.phase,
            snap.score,
            snap.level,
            snap.lives,
            snap.enemies_defeated,
            snap.next_level_at,
            snap.time,
        );
    }

    Ok(())
}
