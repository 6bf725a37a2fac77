//! Key-state tracking for the four movement directions plus the dialogue action key.
//! This module exists to make single-direction precedence a named, testable rule.
//! It does not own what a direction does to the world.

use serde::{Deserialize, Serialize};

use crate::geometry::VELOCITY;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Resolution order when several movement keys are held at once.
    pub const PRECEDENCE: [Direction; 4] =
        [Direction::North, Direction::South, Direction::West, Direction::East];

    /// How far the world (not the player) moves when walking this way for one tick.
    pub fn scroll_delta(self) -> (f32, f32) {
        match self {
            Direction::North => (0.0, VELOCITY),
            Direction::South => (0.0, -VELOCITY),
            Direction::West => (VELOCITY, 0.0),
            Direction::East => (-VELOCITY, 0.0),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawKey {
    W,
    A,
    S,
    D,
    Action,
    Other,
}

impl RawKey {
    pub fn direction(self) -> Option<Direction> {
        match self {
            RawKey::W => Some(Direction::North),
            RawKey::S => Some(Direction::South),
            RawKey::A => Some(Direction::West),
            RawKey::D => Some(Direction::East),
            RawKey::Action | RawKey::Other => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Down(RawKey),
    Up(RawKey),
}

/// Side effects of a key event that belong to someone other than `KeyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    ToggleDialogue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; 4],
}

impl KeyState {
    pub fn press(&mut self, direction: Direction) {
        self.pressed[direction.index()] = true;
    }

    pub fn release(&mut self, direction: Direction) {
        self.pressed[direction.index()] = false;
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.pressed[direction.index()]
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|pressed| *pressed)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }

    /// The one direction that counts this tick: first pressed in [`Direction::PRECEDENCE`].
    pub fn direction(&self) -> Option<Direction> {
        Direction::PRECEDENCE.into_iter().find(|direction| self.is_pressed(*direction))
    }

    pub fn apply(&mut self, event: KeyEvent) -> Option<InputAction> {
        match event {
            KeyEvent::Down(RawKey::Action) => Some(InputAction::ToggleDialogue),
            KeyEvent::Down(key) => {
                if let Some(direction) = key.direction() {
                    self.press(direction);
                }
                None
            }
            KeyEvent::Up(key) => {
                if let Some(direction) = key.direction() {
                    self.release(direction);
                }
                None
            }
        }
    }
}
