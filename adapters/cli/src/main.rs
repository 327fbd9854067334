#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a tracking signal through the neck maze.

mod backend;
mod config;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use neck_maze_rendering::{Color, Presentation, RenderingBackend};
use neck_maze_system_bootstrap::Bootstrap;
use neck_maze_system_tracking::Tracking;
use neck_maze_world::{self as world, query};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use crate::{
    backend::TerminalBackend,
    config::{load_maze_config, open_signal_track, Args},
    scene::{build_scene, sync_scene},
};

const WINDOW_TITLE: &str = "Maze";

/// Entry point for the neck maze command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_maze_config(args.config.as_deref())?;
    let track = open_signal_track(args.signals.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "placing player and goal");
    let mut world = Bootstrap::new(config)
        .start(&mut ChaCha8Rng::seed_from_u64(seed))
        .context("failed to start maze session")?;

    let presentation = Presentation::new(WINDOW_TITLE, Color::BLACK, build_scene(&world)?);
    let backend = TerminalBackend::new(track, std::io::stdout().lock(), args.columns, args.rows)
        .with_frame_step(args.frame_step())
        .with_every_frame(args.every_frame)
        .with_snapshot(args.snapshot.clone());

    let mut tracking = Tracking::new(args.mapper());
    let mut commands = Vec::new();
    let mut events = Vec::new();
    backend.run(presentation, |dt, input, scene| {
        tracking.handle(input.sample, dt, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        for event in events.drain(..) {
            trace!(?event, "world event");
        }
        sync_scene(&world, scene);
    })?;

    match query::elapsed_seconds(&world) {
        Some(elapsed) => info!(elapsed, "goal reached"),
        None => info!(
            player = ?query::player(&world).position(),
            goal = ?query::goal(&world).position(),
            "signal track ended before the goal was reached"
        ),
    }
    Ok(())
}
