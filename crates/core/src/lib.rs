pub mod collision;
pub mod config;
pub mod dialogue;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod scheduler;
pub mod transition;
pub mod types;
pub mod world;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, MapConfig, MapId, WorldConfig};
pub use dialogue::{ContentBlock, Dialogue, DialogueState};
pub use entities::{ImageRef, Player, PlayerSprites, Renderer, SpriteFrame, ZoneKind};
pub use game::Game;
pub use geometry::{Position, Rect, TILE_SIZE, VELOCITY};
pub use input::{Direction, KeyEvent, KeyState, RawKey};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use types::*;
pub use world::{MapLoad, World, WorldError};
