mod script;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use overworld::config::COLLISION_TILE;
use overworld::{Game, ImageRef, Player, PlayerSprites, Position, World, WorldConfig};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::{HeadlessRenderer, parse_script, run_script};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a map file and summarise every map in it
    Validate {
        #[arg(short, long)]
        maps: PathBuf,
    },
    /// Drive a headless session through a key script such as `north*10,idle,west*4`
    Walk {
        #[arg(short, long)]
        maps: PathBuf,
        #[arg(short, long)]
        script: String,
        /// Player box top-left on screen
        #[arg(long, default_value_t = 456.0)]
        screen_x: f32,
        #[arg(long, default_value_t = 246.0)]
        screen_y: f32,
        /// Player frame size in pixels
        #[arg(long, default_value_t = 48.0)]
        size: f32,
        /// Emit events and the summary as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct WalkSummary {
    frames: usize,
    final_tick: u64,
    map: String,
    cached_maps: usize,
    snapshot_hash: String,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    match args.command {
        Command::Validate { maps } => validate(&maps),
        Command::Walk { maps, script, screen_x, screen_y, size, json } => {
            walk(&maps, &script, Position::new(screen_x, screen_y), size, json)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load(path: &Path) -> Result<WorldConfig> {
    WorldConfig::load(path).with_context(|| format!("Failed to load map file: {}", path.display()))
}

fn validate(path: &Path) -> Result<()> {
    let config = load(path)?;
    let world = World::new(config.clone()).context("Failed to build start map")?;
    println!("Start map: {}", world.active_map());
    for (id, map) in &config.maps {
        let walls = map.collisions.iter().filter(|cell| **cell == COLLISION_TILE);
        println!(
            "{id}: {}x{} tiles, zoom {}, {} walls, {} doors, {} prompts, {} animations",
            map.dimensions.width,
            map.dimensions.height,
            map.zoom_scale,
            walls.count(),
            map.doors.len(),
            map.prompts.len(),
            map.animations.len(),
        );
    }
    println!("OK: {} maps", config.maps.len());
    Ok(())
}

fn walk(path: &Path, script: &str, screen: Position, size: f32, json: bool) -> Result<()> {
    let config = load(path)?;
    let steps = parse_script(script).context("Failed to parse key script")?;

    let sprites = PlayerSprites {
        up: ImageRef::new("player_up.png"),
        down: ImageRef::new("player_down.png"),
        left: ImageRef::new("player_left.png"),
        right: ImageRef::new("player_right.png"),
    };
    let mut player = Player::new(screen, sprites);
    player.set_frame_size(size, size);
    let mut game = Game::new(config, player).context("Map file rejected")?;
    game.start();

    let mut renderer = HeadlessRenderer::default();
    let reports = run_script(&mut game, &steps, &mut renderer);
    info!(frames = reports.len(), sprites = renderer.sprites_drawn, "walk finished");

    let summary = WalkSummary {
        frames: reports.len(),
        final_tick: game.current_tick(),
        map: game.world().active_map().to_string(),
        cached_maps: game.world().cached_maps().count(),
        snapshot_hash: format!("0x{:016x}", game.snapshot_hash()),
    };

    if json {
        for event in game.log() {
            println!("{}", serde_json::to_string(event)?);
        }
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    for event in game.log() {
        println!("{event:?}");
    }
    println!("Walk complete.");
    println!("Frames: {}", summary.frames);
    println!("Final Tick: {}", summary.final_tick);
    println!("Map: {}", summary.map);
    println!("Cached Maps: {}", summary.cached_maps);
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}
