use serde::Serialize;

use crate::config::MapId;
use crate::input::Direction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    MapLoaded { map: MapId, from_cache: bool },
    DoorEntered { from: MapId, to: MapId },
    /// Emitted when the blocked direction changes, not on every blocked tick.
    Blocked { direction: Direction },
    DialogueShown { title: String },
    DialogueCleared,
    DialogueToggled { visible: bool },
}

/// Summary of one frame, returned to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub tick: u64,
    pub map: MapId,
    pub blocked: Option<Direction>,
    /// Destination map when this frame went through a door.
    pub entered: Option<MapId>,
}
