//! Boundary scan that decides whether this tick's movement is blocked.
//! This module exists to compute the blocked direction before anything moves.
//! It does not move entities or react to doors and prompts.

use tracing::debug;

use crate::entities::Player;
use crate::geometry::{pad_rectangle, rectangular_collision};
use crate::input::{Direction, KeyState};
use crate::world::World;

/// The direction the player may not move this tick, if any.
///
/// Skipped entirely while no key is held or the player has no collision box yet.
pub fn compute_blocked_direction(
    world: &World,
    player: &Player,
    keys: &KeyState,
) -> Option<Direction> {
    let direction = keys.direction()?;
    let player_box = player.collision_box()?;

    let hit = world.boundaries().find(|(_, boundary)| {
        rectangular_collision(&player_box, &pad_rectangle(&boundary.rect(), keys))
    });
    hit.map(|(id, _)| {
        debug!(?id, ?direction, "movement blocked");
        direction
    })
}
