//! Prompt zones and the dialogue state they push to the UI layer.
//! This module exists to keep overlap-to-dialogue synchronization and its de-duplication in one place.
//! It does not own how dialogue is rendered or when the scan runs.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::Player;
use crate::geometry::{pad_rectangle, rectangular_collision};
use crate::input::KeyState;
use crate::world::World;

/// One renderable block of prompt text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { text: String },
    Paragraph { text: String },
    Bullets { items: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialogue {
    pub title: String,
    pub content: Vec<ContentBlock>,
}

/// What the UI layer renders: the active dialogue and whether its box is open.
#[derive(Clone, Debug, Default)]
pub struct DialogueState {
    pub show_dialogue: bool,
    pub dialogue: Option<Rc<Dialogue>>,
}

impl DialogueState {
    pub fn title(&self) -> Option<&str> {
        self.dialogue.as_deref().map(|dialogue| dialogue.title.as_str())
    }

    /// Whether `dialogue` is the exact instance currently shown.
    pub fn holds(&self, dialogue: &Rc<Dialogue>) -> bool {
        self.dialogue.as_ref().is_some_and(|current| Rc::ptr_eq(current, dialogue))
    }

    /// Whether the dialogue box should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.show_dialogue && self.dialogue.is_some()
    }
}

/// Result of an updater: a replacement state, or `Unchanged` to skip the re-render.
#[derive(Clone, Debug)]
pub enum StateChange {
    Unchanged,
    Replace(DialogueState),
}

/// One-way channel from the engine to the UI. Updates apply in issuance order.
#[derive(Debug, Default)]
pub struct DialogueStore {
    state: DialogueState,
    revision: u64,
}

impl DialogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    /// Bumped once per applied `Replace`; consumers re-render when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, updater: impl FnOnce(&DialogueState) -> StateChange) -> bool {
        match updater(&self.state) {
            StateChange::Unchanged => false,
            StateChange::Replace(next) => {
                self.state = next;
                self.revision += 1;
                true
            }
        }
    }
}

/// Dialogue changes produced by one prompt scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptSync {
    pub shown: Vec<String>,
    pub cleared: bool,
}

/// Reconcile prompt overlap with the dialogue store for one tick.
pub fn sync_prompts(
    world: &World,
    player: &Player,
    keys: &KeyState,
    store: &mut DialogueStore,
) -> PromptSync {
    let mut sync = PromptSync::default();
    if !keys.any_pressed() {
        return sync;
    }
    let Some(player_box) = player.collision_box() else {
        return sync;
    };

    for (_, prompt) in world.prompts() {
        let padded = pad_rectangle(&prompt.rect(), keys);
        let dialogue = prompt.dialogue();
        if rectangular_collision(&player_box, &padded) {
            let changed = store.update(|prev| {
                if prev.title() == Some(dialogue.title.as_str()) {
                    return StateChange::Unchanged;
                }
                StateChange::Replace(DialogueState {
                    show_dialogue: prev.show_dialogue,
                    dialogue: Some(Rc::clone(dialogue)),
                })
            });
            if changed {
                debug!(title = %dialogue.title, "prompt entered");
                sync.shown.push(dialogue.title.clone());
            }
        } else {
            let changed = store.update(|prev| {
                if prev.holds(dialogue) {
                    return StateChange::Replace(DialogueState {
                        show_dialogue: false,
                        dialogue: None,
                    });
                }
                StateChange::Unchanged
            });
            if changed {
                debug!(title = %dialogue.title, "prompt left");
                sync.cleared = true;
            }
        }
    }
    sync
}

/// Drop the held dialogue when no prompt on the active map owns it. Runs after a map change.
pub fn release_unreachable(world: &World, store: &mut DialogueStore) -> bool {
    store.update(|prev| {
        if prev.dialogue.is_none()
            || world.prompts().any(|(_, prompt)| prev.holds(prompt.dialogue()))
        {
            return StateChange::Unchanged;
        }
        StateChange::Replace(DialogueState { show_dialogue: false, dialogue: None })
    })
}

/// Action key: open or close the box, but only when there is something to show.
pub fn toggle_visibility(store: &mut DialogueStore) -> Option<bool> {
    let mut visible = None;
    store.update(|prev| {
        if prev.dialogue.is_none() {
            return StateChange::Unchanged;
        }
        visible = Some(!prev.show_dialogue);
        StateChange::Replace(DialogueState {
            show_dialogue: !prev.show_dialogue,
            dialogue: prev.dialogue.clone(),
        })
    });
    visible
}
