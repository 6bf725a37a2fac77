//! Shared fixtures for the engine's unit test suites.
//! This module exists to avoid repeating map and player setup across modules.
//! It does not own production logic.

use crate::config::WorldConfig;
use crate::entities::{ImageRef, Player, PlayerSprites};
use crate::geometry::Position;
use crate::world::World;

/// Screen-fixed player box used by every fixture: 48x48 at (480, 270).
pub(crate) const PLAYER_SCREEN: Position = Position::new(480.0, 270.0);
pub(crate) const PLAYER_SIZE: f32 = 48.0;

pub(crate) const TWO_MAPS_TOML: &str = r#"
start = "island"

[maps.island]
background = "island.png"
foreground = "island_foreground.png"
offset = { x = -100.0, y = -50.0 }
dimensions = { width = 3, height = 2 }
zoom_scale = 4.0
collisions = [0, 1025, 0, 0, 0, 1025]

[[maps.island.doors]]
target = "museum"
entry_direction = "north"
position = { x = 1, y = 0 }

[[maps.island.animations]]
image = "river.png"
position = { x = 2, y = 1 }
frames = { total = 3, rate = 80 }

[maps.museum]
background = "museum.png"
offset = { x = 0.0, y = 0.0 }
dimensions = { width = 2, height = 1 }
zoom_scale = 3.5
collisions = [0, 0]

[[maps.museum.doors]]
target = "island"
entry_direction = "south"
position = { x = 0, y = 0 }
span = { width = 2, height = 1 }

[[maps.museum.prompts]]
title = "Welcome"
position = { x = 1, y = 0 }
content = [{ kind = "paragraph", text = "Hello" }]
"#;

// Player tile is (1, 1); the only wall sits one tile below it, 2px away.
pub(crate) const SOUTH_WALL_TOML: &str = r#"
start = "field"

[maps.field]
background = "field.png"
offset = { x = 432.0, y = 224.0 }
dimensions = { width = 3, height = 3 }
zoom_scale = 4.0
collisions = [0, 0, 0, 0, 0, 0, 0, 1025, 0]
"#;

pub(crate) const PROMPT_ROOM_TOML: &str = r#"
start = "hall"

[maps.hall]
background = "hall.png"
offset = { x = 432.0, y = 224.0 }
dimensions = { width = 3, height = 3 }
zoom_scale = 4.0
collisions = [0, 0, 0, 0, 0, 0, 0, 0, 0]

[[maps.hall.prompts]]
title = "Welcome"
position = { x = 1, y = 1 }
content = [{ kind = "heading", text = "Museum" }, { kind = "bullets", items = ["one", "two"] }]
"#;

pub(crate) fn sprites() -> PlayerSprites {
    PlayerSprites {
        up: ImageRef::new("player_up.png"),
        down: ImageRef::new("player_down.png"),
        left: ImageRef::new("player_left.png"),
        right: ImageRef::new("player_right.png"),
    }
}

pub(crate) fn unsized_player(position: Position) -> Player {
    Player::new(position, sprites())
}

pub(crate) fn sized_player() -> Player {
    let mut player = unsized_player(PLAYER_SCREEN);
    player.set_frame_size(PLAYER_SIZE, PLAYER_SIZE);
    player
}

pub(crate) fn two_map_config() -> WorldConfig {
    parse(TWO_MAPS_TOML)
}

pub(crate) fn south_wall_fixture() -> (World, Player) {
    (world(SOUTH_WALL_TOML), sized_player())
}

pub(crate) fn prompt_room_fixture() -> (World, Player) {
    (world(PROMPT_ROOM_TOML), sized_player())
}

/// A `collisions = [...]` line with every cell walkable.
pub(crate) fn empty_grid(cells: usize) -> String {
    format!("collisions = [{}]", vec!["0"; cells].join(", "))
}

pub(crate) fn parse(toml: &str) -> WorldConfig {
    WorldConfig::from_toml_str(toml).expect("fixture config should be valid")
}

pub(crate) fn world(toml: &str) -> World {
    World::new(parse(toml)).expect("fixture world should load")
}
