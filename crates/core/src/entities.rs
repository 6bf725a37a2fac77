//! Drawable world entities and the shared world-scroll movement rule.
//! This module exists so every map-owned entity moves by the same rule and draws through one seam.
//! It does not own entity lifetimes; the world arenas do.

use std::rc::Rc;

use crate::config::{FrameSpec, MapId};
use crate::dialogue::Dialogue;
use crate::geometry::{Position, Rect};
use crate::input::{Direction, KeyState};

/// Opaque image handle; only the renderer knows how to resolve it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which horizontal slice of a sprite sheet to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteFrame {
    pub index: u32,
    pub total: u32,
}

impl SpriteFrame {
    pub const SINGLE: SpriteFrame = SpriteFrame { index: 0, total: 1 };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneKind {
    Boundary,
    Door,
    Prompt,
}

/// Drawing seam implemented by the host's sprite primitive.
pub trait Renderer {
    fn draw_sprite(&mut self, image: &ImageRef, position: Position, frame: SpriteFrame);

    /// Collision zones are invisible unless the host opts into a debug overlay.
    fn draw_zone(&mut self, _kind: ZoneKind, _rect: Rect) {}
}

/// World-scroll movement shared by everything except the player.
pub trait Movable {
    fn position_mut(&mut self) -> &mut Position;

    fn handle_keyboard_input(&mut self, keys: &KeyState, blocked: Option<Direction>) {
        if blocked.is_some() {
            return;
        }
        let Some(direction) = keys.direction() else {
            return;
        };
        let (dx, dy) = direction.scroll_delta();
        self.position_mut().translate(dx, dy);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    frames: FrameSpec,
    current: u32,
    elapsed: u32,
}

impl Animation {
    pub fn new(frames: FrameSpec) -> Self {
        Self { frames, current: 0, elapsed: 0 }
    }

    pub fn advance(&mut self) {
        self.elapsed = self.elapsed.wrapping_add(1);
        if self.elapsed % self.frames.rate.max(1) == 0 {
            self.current = (self.current + 1) % self.frames.total.max(1);
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed = 0;
    }

    pub fn frame(&self) -> SpriteFrame {
        SpriteFrame { index: self.current, total: self.frames.total.max(1) }
    }
}

/// Background or foreground image for one map.
#[derive(Clone, Debug)]
pub struct Backdrop {
    pub image: ImageRef,
    pub position: Position,
}

impl Backdrop {
    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw_sprite(&self.image, self.position, SpriteFrame::SINGLE);
    }
}

impl Movable for Backdrop {
    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

#[derive(Clone, Debug)]
pub struct Boundary {
    pub position: Position,
    pub width: f32,
    pub height: f32,
}

impl Boundary {
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.width, self.height)
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw_zone(ZoneKind::Boundary, self.rect());
    }
}

impl Movable for Boundary {
    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

#[derive(Clone, Debug)]
pub struct Door {
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub target: MapId,
    pub entry_direction: Direction,
}

impl Door {
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.width, self.height)
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw_zone(ZoneKind::Door, self.rect());
    }
}

impl Movable for Door {
    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

#[derive(Clone, Debug)]
pub struct Prompt {
    pub position: Position,
    pub width: f32,
    pub height: f32,
    dialogue: Rc<Dialogue>,
}

impl Prompt {
    pub fn new(position: Position, width: f32, height: f32, dialogue: Dialogue) -> Self {
        Self { position, width, height, dialogue: Rc::new(dialogue) }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.width, self.height)
    }

    pub fn dialogue(&self) -> &Rc<Dialogue> {
        &self.dialogue
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw_zone(ZoneKind::Prompt, self.rect());
    }
}

impl Movable for Prompt {
    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

/// Decorative looping sprite (waterfalls, rivers) that scrolls with the map.
#[derive(Clone, Debug)]
pub struct AnimatedOverlay {
    pub image: ImageRef,
    pub position: Position,
    animation: Animation,
}

impl AnimatedOverlay {
    pub fn new(image: ImageRef, position: Position, frames: FrameSpec) -> Self {
        Self { image, position, animation: Animation::new(frames) }
    }

    pub fn frame(&self) -> SpriteFrame {
        self.animation.frame()
    }

    pub fn draw(&mut self, renderer: &mut impl Renderer) {
        renderer.draw_sprite(&self.image, self.position, self.animation.frame());
        self.animation.advance();
    }
}

impl Movable for AnimatedOverlay {
    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

#[derive(Clone, Debug)]
pub struct PlayerSprites {
    pub up: ImageRef,
    pub down: ImageRef,
    pub left: ImageRef,
    pub right: ImageRef,
}

impl PlayerSprites {
    fn facing(&self, direction: Direction) -> &ImageRef {
        match direction {
            Direction::North => &self.up,
            Direction::South => &self.down,
            Direction::West => &self.left,
            Direction::East => &self.right,
        }
    }
}

pub const PLAYER_FRAMES: FrameSpec = FrameSpec { total: 4, rate: 10 };

/// The screen-fixed player. It never scrolls; it only turns and animates.
#[derive(Clone, Debug)]
pub struct Player {
    screen_position: Position,
    frame_size: Option<(f32, f32)>,
    sprites: PlayerSprites,
    facing: Direction,
    moving: bool,
    animation: Animation,
}

impl Player {
    pub fn new(screen_position: Position, sprites: PlayerSprites) -> Self {
        Self {
            screen_position,
            frame_size: None,
            sprites,
            facing: Direction::South,
            moving: false,
            animation: Animation::new(PLAYER_FRAMES),
        }
    }

    /// Size of one animation frame; until set the player has no collision box.
    pub fn set_frame_size(&mut self, width: f32, height: f32) {
        self.frame_size = Some((width, height));
    }

    pub fn set_screen_position(&mut self, position: Position) {
        self.screen_position = position;
    }

    pub fn screen_position(&self) -> Position {
        self.screen_position
    }

    pub fn collision_box(&self) -> Option<Rect> {
        self.frame_size.map(|(w, h)| Rect::at(self.screen_position, w, h))
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn frame(&self) -> SpriteFrame {
        self.animation.frame()
    }

    pub fn handle_keyboard_input(&mut self, direction: Option<Direction>) {
        match direction {
            Some(direction) => {
                self.facing = direction;
                self.moving = true;
            }
            None => {
                self.moving = false;
                self.animation.reset();
            }
        }
    }

    pub fn draw(&mut self, renderer: &mut impl Renderer) {
        renderer.draw_sprite(
            self.sprites.facing(self.facing),
            self.screen_position,
            self.animation.frame(),
        );
        if self.moving {
            self.animation.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VELOCITY;

    fn sprites() -> PlayerSprites {
        PlayerSprites {
            up: ImageRef::new("up"),
            down: ImageRef::new("down"),
            left: ImageRef::new("left"),
            right: ImageRef::new("right"),
        }
    }

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<(String, SpriteFrame)>,
    }

    impl Renderer for Recorder {
        fn draw_sprite(&mut self, image: &ImageRef, _position: Position, frame: SpriteFrame) {
            self.sprites.push((image.as_str().to_string(), frame));
        }
    }

    #[test]
    fn blocked_direction_freezes_movables() {
        let mut boundary = Boundary { position: Position::new(10.0, 10.0), width: 4.0, height: 4.0 };
        let mut keys = KeyState::default();
        keys.press(Direction::North);

        boundary.handle_keyboard_input(&keys, Some(Direction::North));
        assert_eq!(boundary.position, Position::new(10.0, 10.0));

        boundary.handle_keyboard_input(&keys, None);
        assert_eq!(boundary.position, Position::new(10.0, 10.0 + VELOCITY));
    }

    #[test]
    fn idle_keys_leave_movables_in_place() {
        let mut backdrop = Backdrop { image: ImageRef::new("bg"), position: Position::new(1.0, 2.0) };
        backdrop.handle_keyboard_input(&KeyState::default(), None);
        assert_eq!(backdrop.position, Position::new(1.0, 2.0));
    }

    #[test]
    fn player_has_no_collision_box_until_sized() {
        let mut player = Player::new(Position::new(100.0, 50.0), sprites());
        assert_eq!(player.collision_box(), None);
        player.set_frame_size(48.0, 68.0);
        assert_eq!(player.collision_box(), Some(Rect::new(100.0, 50.0, 48.0, 68.0)));
    }

    #[test]
    fn player_turns_and_animates_only_while_moving() {
        let mut player = Player::new(Position::default(), sprites());
        let mut recorder = Recorder::default();

        for _ in 0..PLAYER_FRAMES.rate {
            player.draw(&mut recorder);
        }
        assert_eq!(player.frame().index, 0);

        player.handle_keyboard_input(Some(Direction::West));
        for _ in 0..PLAYER_FRAMES.rate {
            player.draw(&mut recorder);
        }
        assert_eq!(player.facing(), Direction::West);
        assert_eq!(player.frame().index, 1);
        assert_eq!(recorder.sprites.last().map(|(name, _)| name.as_str()), Some("left"));

        player.handle_keyboard_input(None);
        assert!(!player.is_moving());
        assert_eq!(player.frame().index, 0);
        assert_eq!(player.facing(), Direction::West);
    }

    #[test]
    fn overlay_loops_through_frames() {
        let frames = FrameSpec { total: 3, rate: 2 };
        let mut overlay = AnimatedOverlay::new(ImageRef::new("river"), Position::default(), frames);
        let mut recorder = Recorder::default();
        for _ in 0..6 {
            overlay.draw(&mut recorder);
        }
        let indices: Vec<u32> = recorder.sprites.iter().map(|(_, frame)| frame.index).collect();
        assert_eq!(indices, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(overlay.frame().index, 0);
    }
}
