//! Lemon engine demo.
//!
//! Opens a window and lets a player square walk around, either in a built-in
//! room or in a Tiled JSON map passed with `--map`.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --map assets/level.json --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use std::path::PathBuf;

use lemonengine::game::{build_room, spawn_player};
use lemonengine::lemon::Lemon;
use lemonengine::resources::gameconfig::GameConfig;

/// Lemon Engine 2D demo
#[derive(Parser)]
#[command(version, about = "A walk-around demo for the Lemon 2D engine")]
struct Cli {
    /// INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tiled JSON map to load instead of the built-in room.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if cli.debug {
        config.debug = true;
    }

    let mut lemon = match Lemon::init(config) {
        Ok(lemon) => lemon,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    match cli.map {
        Some(path) => {
            if let Err(e) = lemon.load_tilemap(&path) {
                log::error!("Failed to load map {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => {
            let (w, h) = (lemon.config.width, lemon.config.height);
            build_room(&mut lemon.scene, w, h);
        }
    }
    spawn_player(&mut lemon.scene);
    lemon.print(format!("{} entities in scene", lemon.scene.len()));

    while !lemon.should_end() {
        lemon.step();
    }

    log::info!("Bye!");
}
