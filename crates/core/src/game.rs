//! The navigation session: one world, one screen-fixed player, one key state.
//! This file owns session state and the raw input channel; frame composition lives in `frame`.

use std::mem;

use crate::config::{ConfigError, WorldConfig};
use crate::dialogue::{DialogueState, DialogueStore, toggle_visibility};
use crate::entities::Player;
use crate::input::{Direction, InputAction, KeyEvent, KeyState};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::transition::TransitionState;
use crate::types::*;
use crate::world::World;

mod frame;
mod hash;


pub struct Game {
    world: World,
    player: Player,
    keys: KeyState,
    scheduler: FrameScheduler,
    dialogue: DialogueStore,
    transition: TransitionState,
    log: Vec<LogEvent>,
    tick: u64,
    last_blocked: Option<Direction>,
}

impl Game {
    pub fn new(config: WorldConfig, player: Player) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let start = world.active_map().clone();
        Ok(Self {
            world,
            player,
            keys: KeyState::default(),
            scheduler: FrameScheduler::new(),
            dialogue: DialogueStore::new(),
            transition: TransitionState::default(),
            log: vec![LogEvent::MapLoaded { map: start, from_cache: false }],
            tick: 0,
            last_blocked: None,
        })
    }

    /// Arm the first frame. The host then drives `run_due_frame` once per refresh.
    pub fn start(&mut self) -> FrameHandle {
        self.scheduler.request_frame()
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if self.keys.apply(event) == Some(InputAction::ToggleDialogue)
            && let Some(visible) = toggle_visibility(&mut self.dialogue)
        {
            self.log.push(LogEvent::DialogueToggled { visible });
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn dialogue(&self) -> &DialogueState {
        self.dialogue.state()
    }

    pub fn dialogue_revision(&self) -> u64 {
        self.dialogue.revision()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn transition_state(&self) -> &TransitionState {
        &self.transition
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Hand the accumulated events to the caller, leaving the log empty.
    pub fn drain_log(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }
}
