//! Keyboard edge collection for one rendered frame.

use app::key_map::TRACKED_KEYS;
use app::session::KeyEdges;
use macroquad::prelude::{is_key_pressed, is_key_released};

pub fn capture_key_edges() -> KeyEdges {
    let pressed = TRACKED_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();
    let released = TRACKED_KEYS.into_iter().filter(|key| is_key_released(*key)).collect();
    KeyEdges { pressed, released }
}
