//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns out of the frame loop.
//! It does not own world-level hashing, which `World::snapshot_hash` covers.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.tick);
        hasher.write_u64(self.world.snapshot_hash());
        hasher.write_u8(match self.player.facing() {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        });
        hasher.write_u8(u8::from(self.player.is_moving()));
        let dialogue = self.dialogue.state();
        hasher.write_u8(u8::from(dialogue.show_dialogue));
        if let Some(title) = dialogue.title() {
            hasher.write(title.as_bytes());
        }
        hasher.finish()
    }
}
