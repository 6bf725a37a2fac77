//! Scripted key sequences for headless walks, e.g. `north*10,idle*2,action,west*5`.

use anyhow::{Context, Result, bail};
use overworld::{FrameReport, Game, ImageRef, KeyEvent, Position, RawKey, Renderer, SpriteFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Hold { key: RawKey, frames: u32 },
    Idle { frames: u32 },
    Action,
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<Step> {
    let (name, count) = match token.split_once('*') {
        Some((name, count)) => {
            let frames = count
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid frame count in `{token}`"))?;
            (name.trim(), frames)
        }
        None => (token, 1),
    };
    let key = match name.to_ascii_lowercase().as_str() {
        "n" | "north" => RawKey::W,
        "s" | "south" => RawKey::S,
        "w" | "west" => RawKey::A,
        "e" | "east" => RawKey::D,
        "idle" => return Ok(Step::Idle { frames: count }),
        "action" | "space" => return Ok(Step::Action),
        _ => bail!("unknown step `{name}` (expected north, south, west, east, idle or action)"),
    };
    Ok(Step::Hold { key, frames: count })
}

/// Renderer that only counts draw calls.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub sprites_drawn: u64,
}

impl Renderer for HeadlessRenderer {
    fn draw_sprite(&mut self, _image: &ImageRef, _position: Position, _frame: SpriteFrame) {
        self.sprites_drawn += 1;
    }
}

/// Play `steps` against a started game, one host refresh per frame.
pub fn run_script(
    game: &mut Game,
    steps: &[Step],
    renderer: &mut HeadlessRenderer,
) -> Vec<FrameReport> {
    let mut reports = Vec::new();
    let mut run_frames = |game: &mut Game, frames: u32| {
        for _ in 0..frames {
            reports.extend(game.run_due_frame(renderer));
        }
    };
    for step in steps {
        match *step {
            Step::Hold { key, frames } => {
                game.handle_key(KeyEvent::Down(key));
                run_frames(game, frames);
                game.handle_key(KeyEvent::Up(key));
            }
            Step::Idle { frames } => run_frames(game, frames),
            Step::Action => {
                game.handle_key(KeyEvent::Down(RawKey::Action));
                game.handle_key(KeyEvent::Up(RawKey::Action));
            }
        }
    }
    reports
}
