use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use overworld::geometry::rectangular_collision;
use overworld::{
    Game, ImageRef, KeyEvent, LogEvent, Player, PlayerSprites, Position, RawKey, Renderer,
    SpriteFrame, WorldConfig,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "crates/app/assets/maps.toml")]
    maps: PathBuf,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
}

struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_sprite(&mut self, _image: &ImageRef, _position: Position, _frame: SpriteFrame) {}
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = WorldConfig::load(&args.maps)
        .with_context(|| format!("Failed to load map file: {}", args.maps.display()))?;

    println!("Starting fuzz harness on seed {} for {} ticks...", args.seed, args.ticks);
    let sprites = PlayerSprites {
        up: ImageRef::new("up"),
        down: ImageRef::new("down"),
        left: ImageRef::new("left"),
        right: ImageRef::new("right"),
    };
    let mut player = Player::new(Position::new(456.0, 246.0), sprites);
    player.set_frame_size(48.0, 48.0);
    let mut game = Game::new(config, player).context("Map file rejected")?;
    game.start();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let keys = [RawKey::W, RawKey::A, RawKey::S, RawKey::D, RawKey::Action];
    let mut doors_taken = 0usize;

    for tick in 0..args.ticks {
        let key = choose(&mut rng, &keys);
        // Bias toward holding keys so walks actually cover ground.
        if rng.next_u64() % 3 == 0 {
            game.handle_key(KeyEvent::Up(key));
        } else {
            game.handle_key(KeyEvent::Down(key));
        }

        let report = game.run_due_frame(&mut NullRenderer);
        ensure!(report.is_some(), "Invariant failed: no frame armed at tick {tick}");
        ensure!(game.scheduler().pending().is_some(), "Invariant failed: frame not re-armed");

        let entered = game
            .drain_log()
            .into_iter()
            .filter(|event| matches!(event, LogEvent::DoorEntered { .. }))
            .count();
        ensure!(entered <= 1, "Invariant failed: {entered} transitions in one host tick");
        doors_taken += entered;

        if entered == 0 {
            let player_box = game.player().collision_box().context("player has no box")?;
            let inside_wall = game
                .world()
                .boundaries()
                .any(|(_, wall)| rectangular_collision(&player_box, &wall.rect()));
            ensure!(!inside_wall, "Invariant failed: player inside a wall at tick {tick}");
        }
    }

    println!(
        "Fuzzing completed successfully: {} doors taken, {} maps cached, final map {}.",
        doors_taken,
        game.world().cached_maps().count(),
        game.world().active_map()
    );
    Ok(())
}
