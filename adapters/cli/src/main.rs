#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Gremlins campaign without a window.

mod autopilot;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gremlins_core::{Command, Event, FrameInput, GameStatus, Outcome};
use gremlins_world::{self as world, query, Game};
use log::{debug, info};

use crate::autopilot::Autopilot;

const DEFAULT_SEED: u64 = 0x6772_656d_6c69_6e73;

#[derive(Debug, Parser)]
#[command(name = "gremlins", about = "Plays a Gremlins campaign headlessly")]
struct Args {
    /// Campaign configuration file.
    #[arg(long, default_value = "gremlins.toml")]
    config: PathBuf,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Seed overriding the one in the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Drive the wizard with a seeded random walk.
    #[arg(long)]
    autopilot: bool,
}

/// Tallies gathered while a session runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Summary {
    frames: u32,
    shots: u32,
    kills: u32,
    hits: u32,
    levels_started: u32,
}

impl Summary {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            debug!("{event:?}");
            match event {
                Event::ProjectileFired { .. } => self.shots += 1,
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::PlayerHit { .. } => self.hits += 1,
                Event::LevelStarted { .. } => self.levels_started += 1,
                _ => {}
            }
        }
    }
}

/// Entry point for the Gremlins command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = config::load(&args.config)?;
    let seed = args.seed.or(config.seed).unwrap_or(DEFAULT_SEED);
    info!("starting campaign from {} with seed {seed}", args.config.display());

    let mut summary = Summary::default();
    let mut events = Vec::new();
    let mut game =
        Game::start(config.settings, seed, &mut events).context("failed to start campaign")?;
    summary.record(&events);

    let mut autopilot = args.autopilot.then(|| Autopilot::new(seed.wrapping_add(1)));
    run(&mut game, args.frames, autopilot.as_mut(), &mut summary);

    let progress = query::progress(&game);
    let lives = query::hud(&game).map_or(0, |hud| hud.lives);
    let status = match query::status(&game) {
        GameStatus::Playing => "in progress",
        GameStatus::Finished(Outcome::Won) => "won",
        GameStatus::Finished(Outcome::Lost) => "lost",
    };
    println!(
        "{status} after {} frames: level {} of {} ({} started), {lives} lives, {} shots, {} kills, {} hits",
        summary.frames,
        progress.number.min(progress.total),
        progress.total,
        summary.levels_started,
        summary.shots,
        summary.kills,
        summary.hits,
    );
    Ok(())
}

/// Ticks the game until `frames` elapse or the campaign finishes.
fn run(
    game: &mut Game,
    frames: u32,
    mut autopilot: Option<&mut Autopilot>,
    summary: &mut Summary,
) {
    let mut events = Vec::new();
    for _ in 0..frames {
        if query::status(game) != GameStatus::Playing {
            break;
        }

        let aligned =
            query::level(game).is_some_and(|level| level.player().mover().is_aligned());
        let input = autopilot
            .as_deref_mut()
            .map_or_else(FrameInput::default, |pilot| pilot.next_input(aligned));

        events.clear();
        world::apply(game, Command::Tick { input }, &mut events);
        summary.frames += 1;
        summary.record(&events);
    }
}
