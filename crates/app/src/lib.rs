pub mod dialogue_text;
pub mod key_map;
pub mod session;
pub mod settings;

use std::collections::BTreeSet;

use overworld::{ImageRef, PlayerSprites, WorldConfig};

pub const APP_NAME: &str = "Overworld";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Sprite sheets for the four facings, resolved against the assets directory.
pub fn player_sprites() -> PlayerSprites {
    PlayerSprites {
        up: ImageRef::new("player_up.png"),
        down: ImageRef::new("player_down.png"),
        left: ImageRef::new("player_left.png"),
        right: ImageRef::new("player_right.png"),
    }
}

/// Every image the world and the player can ask the renderer for, deduplicated and sorted.
pub fn referenced_images(config: &WorldConfig, sprites: &PlayerSprites) -> Vec<ImageRef> {
    let mut names = BTreeSet::new();
    for map in config.maps.values() {
        names.insert(map.background.clone());
        names.extend(map.foreground.iter().cloned());
        names.extend(map.animations.iter().map(|animation| animation.image.clone()));
    }
    for sprite in [&sprites.up, &sprites.down, &sprites.left, &sprites.right] {
        names.insert(sprite.as_str().to_string());
    }
    names.into_iter().map(ImageRef::new).collect()
}
