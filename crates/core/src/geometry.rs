//! Rectangle primitives and the look-ahead padding used by every collision scan.
//! This module exists so overlap rules live in one place for boundaries, doors and prompts.
//! It does not own which entities get tested or what a hit means.

use serde::{Deserialize, Serialize};

use crate::input::{Direction, KeyState};

/// Width and height of one source tile, in pixels, before zoom.
pub const TILE_SIZE: f32 = 12.0;
/// Distance the world scrolls in one tick.
pub const VELOCITY: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Multi-tile footprint in tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub width: u32,
    pub height: u32,
}

impl Default for Span {
    fn default() -> Self {
        Self { width: 1, height: 1 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(position: Position, w: f32, h: f32) -> Self {
        Self { x: position.x, y: position.y, w, h }
    }

    /// Square tile rectangle scaled by `zoom_scale` and stretched by `span`.
    pub fn tile(position: Position, zoom_scale: f32, span: Span) -> Self {
        let side = TILE_SIZE * zoom_scale;
        Self::at(position, side * span.width as f32, side * span.height as f32)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Strict axis-aligned overlap: rectangles that only share an edge do not collide.
pub fn rectangular_collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Widen `rect` toward where the world will carry it this tick.
///
/// The result covers both the current rectangle and its next-tick position, so a
/// single tick of scrolling can never jump a zone past the player unnoticed.
pub fn pad_rectangle(rect: &Rect, keys: &KeyState) -> Rect {
    let Some(direction) = keys.direction() else {
        return *rect;
    };
    let mut padded = *rect;
    match direction {
        Direction::North => padded.h += VELOCITY,
        Direction::South => {
            padded.y -= VELOCITY;
            padded.h += VELOCITY;
        }
        Direction::West => padded.w += VELOCITY,
        Direction::East => {
            padded.x -= VELOCITY;
            padded.w += VELOCITY;
        }
    }
    padded
}

/// Doors only fire when entered from their configured side.
pub fn rectangular_door_collision(
    player: &Rect,
    padded_door: &Rect,
    entry_direction: Direction,
    keys: &KeyState,
) -> bool {
    keys.direction() == Some(entry_direction) && rectangular_collision(player, padded_door)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(direction: Direction) -> KeyState {
        let mut keys = KeyState::default();
        keys.press(direction);
        keys
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rectangular_collision(&a, &b));
        assert!(rectangular_collision(&a, &Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn padding_without_input_is_identity() {
        let rect = Rect::new(4.0, 8.0, 48.0, 48.0);
        assert_eq!(pad_rectangle(&rect, &KeyState::default()), rect);
    }

    #[test]
    fn padding_extends_toward_scroll_direction() {
        let rect = Rect::new(100.0, 100.0, 48.0, 48.0);

        let north = pad_rectangle(&rect, &pressed(Direction::North));
        assert_eq!(north, Rect::new(100.0, 100.0, 48.0, 48.0 + VELOCITY));

        let south = pad_rectangle(&rect, &pressed(Direction::South));
        assert_eq!(south, Rect::new(100.0, 100.0 - VELOCITY, 48.0, 48.0 + VELOCITY));

        let west = pad_rectangle(&rect, &pressed(Direction::West));
        assert_eq!(west, Rect::new(100.0, 100.0, 48.0 + VELOCITY, 48.0));

        let east = pad_rectangle(&rect, &pressed(Direction::East));
        assert_eq!(east, Rect::new(100.0 - VELOCITY, 100.0, 48.0 + VELOCITY, 48.0));
    }

    #[test]
    fn padding_follows_direction_precedence() {
        let mut keys = KeyState::default();
        keys.press(Direction::East);
        keys.press(Direction::North);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(pad_rectangle(&rect, &keys), Rect::new(0.0, 0.0, 10.0, 10.0 + VELOCITY));
    }

    #[test]
    fn door_requires_matching_entry_direction() {
        let player = Rect::new(0.0, 0.0, 48.0, 48.0);
        let door = Rect::new(10.0, 10.0, 48.0, 48.0);
        assert!(rectangular_door_collision(
            &player,
            &door,
            Direction::West,
            &pressed(Direction::West)
        ));
        assert!(!rectangular_door_collision(
            &player,
            &door,
            Direction::West,
            &pressed(Direction::South)
        ));
        assert!(!rectangular_door_collision(&player, &door, Direction::West, &KeyState::default()));
    }

    #[test]
    fn span_stretches_tile_rect() {
        let rect = Rect::tile(Position::new(1.0, 2.0), 4.0, Span { width: 5, height: 2 });
        assert_eq!(rect, Rect::new(1.0, 2.0, 240.0, 96.0));
    }
}
