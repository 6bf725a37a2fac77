mod frame_input;
mod sprite;
mod ui_render;
mod window_config;

use anyhow::{Context, Result};
use app::session::AppSession;
use app::settings::AppSettings;
use app::{format_snapshot_hash, player_sprites, referenced_images};
use macroquad::prelude::{
    BLACK, KeyCode, clear_background, is_key_pressed, next_frame, screen_height, screen_width,
};
use macroquad::window::Conf;
use overworld::entities::PLAYER_FRAMES;
use overworld::{Game, Player, Position, WorldConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::frame_input::capture_key_edges;
use crate::sprite::TextureRenderer;

const FALLBACK_PLAYER_SIZE: f32 = 48.0;

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!(error = %format!("{err:#}"), "startup_failed");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

async fn run() -> Result<()> {
    let settings = AppSettings::from_env();
    let config = WorldConfig::load(&settings.maps_path)
        .with_context(|| format!("failed to load maps from {}", settings.maps_path.display()))?;

    let sprites = player_sprites();
    let images = referenced_images(&config, &sprites);
    let mut renderer =
        TextureRenderer::load(&settings.assets_dir, images, settings.debug_zones).await;

    let (width, height) =
        renderer.frame_size(&sprites.down, PLAYER_FRAMES.total).unwrap_or_else(|| {
            warn!(size = FALLBACK_PLAYER_SIZE, "player sprite missing, using fallback frame size");
            (FALLBACK_PLAYER_SIZE, FALLBACK_PLAYER_SIZE)
        });
    let center = Position::new((screen_width() - width) / 2.0, (screen_height() - height) / 2.0);
    let mut player = Player::new(center, sprites);
    player.set_frame_size(width, height);

    let game = Game::new(config, player).context("map config rejected")?;
    info!(
        start = %game.world().active_map(),
        maps = game.world().config().maps.len(),
        debug_zones = settings.debug_zones,
        "world ready"
    );

    let mut session = AppSession::new(game);
    loop {
        clear_background(BLACK);
        let edges = capture_key_edges();
        session.tick(&edges, &mut renderer);
        ui_render::draw_overlay(&session, settings.ui_scale);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }

    info!(
        frames = session.frames_run(),
        map = %session.game().world().active_map(),
        hash = %format_snapshot_hash(session.game().snapshot_hash()),
        "session ended"
    );
    Ok(())
}
