//! Door detection and the Running/Transitioning state around a map swap.
//! This module exists to isolate the directional door test from the frame loop that acts on it.
//! It does not own map loading or frame scheduling.

use crate::config::MapId;
use crate::entities::Player;
use crate::geometry::{pad_rectangle, rectangular_door_collision};
use crate::input::KeyState;
use crate::world::{DoorId, World};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TransitionState {
    #[default]
    Running,
    Transitioning {
        from: MapId,
        to: MapId,
    },
}

impl TransitionState {
    pub fn begin(&mut self, from: MapId, to: MapId) {
        *self = TransitionState::Transitioning { from, to };
    }

    pub fn finish(&mut self) {
        *self = TransitionState::Running;
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, TransitionState::Transitioning { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorEntry {
    pub door: DoorId,
    pub target: MapId,
}

/// First door, in active iteration order, entered from its configured side this tick.
pub fn find_door_entry(world: &World, player: &Player, keys: &KeyState) -> Option<DoorEntry> {
    if !keys.any_pressed() {
        return None;
    }
    let player_box = player.collision_box()?;

    world.doors().find_map(|(id, door)| {
        let padded = pad_rectangle(&door.rect(), keys);
        rectangular_door_collision(&player_box, &padded, door.entry_direction, keys)
            .then(|| DoorEntry { door: id, target: door.target.clone() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::test_support::*;

    // Door at tile (43, 9) facing west, placed exactly on the player's box.
    const WEST_DOOR_TOML: &str = r#"
start = "island"

[maps.island]
background = "island.png"
offset = { x = -1584.0, y = -162.0 }
dimensions = { width = 50, height = 12 }
zoom_scale = 4.0
collisions = []

[[maps.island.doors]]
target = "museum"
entry_direction = "west"
position = { x = 43, y = 9 }

[[maps.island.doors]]
target = "island"
entry_direction = "west"
position = { x = 43, y = 9 }

[maps.museum]
background = "museum.png"
offset = { x = 0.0, y = 0.0 }
dimensions = { width = 1, height = 1 }
zoom_scale = 3.5
collisions = [0]
"#;

    fn west_door_world() -> (World, Player) {
        let toml = WEST_DOOR_TOML.replace("collisions = []", &empty_grid(50 * 12));
        (world(&toml), sized_player())
    }

    fn holding(direction: Direction) -> KeyState {
        let mut keys = KeyState::default();
        keys.press(direction);
        keys
    }

    #[test]
    fn wrong_direction_never_enters() {
        let (world, player) = west_door_world();
        for direction in [Direction::North, Direction::South, Direction::East] {
            assert_eq!(find_door_entry(&world, &player, &holding(direction)), None);
        }
    }

    #[test]
    fn matching_direction_enters_first_door_only() {
        let (world, player) = west_door_world();
        let entry = find_door_entry(&world, &player, &holding(Direction::West)).expect("entry");
        assert_eq!(entry.target, MapId::from("museum"));
        let first_door = world.doors().next().map(|(id, _)| id);
        assert_eq!(Some(entry.door), first_door);
    }

    #[test]
    fn idle_or_unsized_player_is_ignored() {
        let (world, player) = west_door_world();
        assert_eq!(find_door_entry(&world, &player, &KeyState::default()), None);
        let sizeless = unsized_player(player.screen_position());
        assert_eq!(find_door_entry(&world, &sizeless, &holding(Direction::West)), None);
    }

    #[test]
    fn state_machine_round_trip() {
        let mut state = TransitionState::default();
        assert!(!state.is_transitioning());
        state.begin(MapId::from("island"), MapId::from("museum"));
        assert_eq!(state, TransitionState::Transitioning {
            from: MapId::from("island"),
            to: MapId::from("museum"),
        });
        state.finish();
        assert_eq!(state, TransitionState::Running);
    }
}
