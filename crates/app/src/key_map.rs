//! Host key codes to engine keys.

use macroquad::prelude::KeyCode;
use overworld::RawKey;

/// Every key the front end forwards to the engine.
pub const TRACKED_KEYS: [KeyCode; 9] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::Left,
    KeyCode::Down,
    KeyCode::Right,
    KeyCode::Space,
];

pub fn raw_key(code: KeyCode) -> RawKey {
    match code {
        KeyCode::W | KeyCode::Up => RawKey::W,
        KeyCode::A | KeyCode::Left => RawKey::A,
        KeyCode::S | KeyCode::Down => RawKey::S,
        KeyCode::D | KeyCode::Right => RawKey::D,
        KeyCode::Space => RawKey::Action,
        _ => RawKey::Other,
    }
}
