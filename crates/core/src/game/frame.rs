//! One frame of the navigation loop: draw, block, door, prompt, move.
//! This module exists to keep the per-tick ordering in one place.
//! It does not own entity storage or the geometry predicates it calls.

use tracing::{debug, error, info};

use super::*;
use crate::collision::compute_blocked_direction;
use crate::dialogue::{release_unreachable, sync_prompts};
use crate::entities::Renderer;
use crate::transition::{DoorEntry, find_door_entry};
use crate::world::MapLoad;

impl Game {
    /// Run the pending frame, if the host's refresh found one armed.
    pub fn run_due_frame(&mut self, renderer: &mut impl Renderer) -> Option<FrameReport> {
        self.scheduler.take_due()?;
        Some(self.frame(renderer))
    }

    /// Advance one tick. The next frame is re-armed before any work happens.
    pub fn frame(&mut self, renderer: &mut impl Renderer) -> FrameReport {
        self.run_frame(renderer, false)
    }

    fn run_frame(&mut self, renderer: &mut impl Renderer, entered_this_tick: bool) -> FrameReport {
        let handle = self.scheduler.request_frame();
        self.tick += 1;
        self.draw(renderer);

        let keys = self.keys;
        let blocked = compute_blocked_direction(&self.world, &self.player, &keys);
        if blocked != self.last_blocked {
            if let Some(direction) = blocked {
                self.log.push(LogEvent::Blocked { direction });
            }
            self.last_blocked = blocked;
        }

        // A frame nested inside a transition may not start another one.
        if !entered_this_tick
            && let Some(entry) = find_door_entry(&self.world, &self.player, &keys)
        {
            return self.enter_door(renderer, handle, entry);
        }

        let sync = sync_prompts(&self.world, &self.player, &keys, &mut self.dialogue);
        for title in sync.shown {
            self.log.push(LogEvent::DialogueShown { title });
        }
        if sync.cleared {
            self.log.push(LogEvent::DialogueCleared);
        }

        self.player.handle_keyboard_input(keys.direction());
        self.world.apply_movement(&keys, blocked);

        FrameReport { tick: self.tick, map: self.world.active_map().clone(), blocked, entered: None }
    }

    fn draw(&mut self, renderer: &mut impl Renderer) {
        self.world.draw_background(renderer);
        self.world.draw_overlays(renderer);
        self.player.draw(renderer);
        self.world.draw_foreground(renderer);
        self.world.draw_zones(renderer);
    }

    fn enter_door(
        &mut self,
        renderer: &mut impl Renderer,
        handle: FrameHandle,
        entry: DoorEntry,
    ) -> FrameReport {
        let from = self.world.active_map().clone();
        self.scheduler.cancel(handle);
        self.transition.begin(from.clone(), entry.target.clone());
        debug!(door = ?entry.door, %from, to = %entry.target, "door entered");

        let loaded = match self.world.load_map(&entry.target) {
            Ok(load) => {
                let from_cache = load == MapLoad::Cached;
                info!(%from, to = %entry.target, from_cache, "map transition");
                self.log.push(LogEvent::MapLoaded { map: entry.target.clone(), from_cache });
                self.log.push(LogEvent::DoorEntered { from, to: entry.target.clone() });
                // Prompts left behind on the previous map can no longer clear it.
                if release_unreachable(&self.world, &mut self.dialogue) {
                    self.log.push(LogEvent::DialogueCleared);
                }
                true
            }
            Err(err) => {
                error!(%err, "door target could not be loaded, staying on current map");
                false
            }
        };
        self.transition.finish();
        self.last_blocked = None;

        let mut report = self.run_frame(renderer, true);
        report.entered = loaded.then_some(entry.target);
        report
    }
}
