//! Host-side wrapper around a running `Game`: key edges in, frames and event lines out.

use std::collections::VecDeque;

use macroquad::prelude::KeyCode;
use overworld::{FrameReport, Game, KeyEvent, Renderer};
use tracing::debug;

use crate::dialogue_text::event_log_line;
use crate::key_map::raw_key;

/// Event lines kept for the on-screen log.
pub const EVENT_LOG_CAPACITY: usize = 8;

/// Keys that changed state since the previous display refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEdges {
    pub pressed: Vec<KeyCode>,
    pub released: Vec<KeyCode>,
}

pub struct AppSession {
    game: Game,
    // Physical keys currently down; arrows and WASD share engine keys.
    held: Vec<KeyCode>,
    event_lines: VecDeque<String>,
    frames_run: u64,
}

impl AppSession {
    /// Wrap `game` and arm its first frame.
    pub fn new(mut game: Game) -> Self {
        game.start();
        let mut session =
            Self { game, held: Vec::new(), event_lines: VecDeque::new(), frames_run: 0 };
        session.collect_events();
        session
    }

    /// One display refresh: forward key edges, then run the frame if one is due.
    pub fn tick(&mut self, edges: &KeyEdges, renderer: &mut impl Renderer) -> Option<FrameReport> {
        // Presses before releases, so a tap inside one refresh cannot leave a key stuck down.
        for code in &edges.pressed {
            if !self.held.contains(code) {
                self.held.push(*code);
            }
            self.game.handle_key(KeyEvent::Down(raw_key(*code)));
        }
        for code in &edges.released {
            self.held.retain(|held| held != code);
            let key = raw_key(*code);
            // Another physical key bound to the same engine key keeps it down.
            if !self.held.iter().any(|held| raw_key(*held) == key) {
                self.game.handle_key(KeyEvent::Up(key));
            }
        }

        let report = self.game.run_due_frame(renderer);
        if let Some(report) = &report {
            self.frames_run += 1;
            if let Some(map) = &report.entered {
                debug!(%map, tick = report.tick, "frame crossed a door");
            }
        }
        self.collect_events();
        report
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn event_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.event_lines.iter().map(String::as_str)
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    fn collect_events(&mut self) {
        for event in self.game.drain_log() {
            if self.event_lines.len() == EVENT_LOG_CAPACITY {
                self.event_lines.pop_front();
            }
            self.event_lines.push_back(event_log_line(&event));
        }
    }
}
