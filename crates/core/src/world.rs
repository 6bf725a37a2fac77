//! Map loading, the per-map entity cache and access to the active entity set.
//! This module exists so exactly one map's entities are reachable at a time, and so revisits reuse them.
//! It does not own collision policy, transitions or the frame loop.

use std::collections::HashMap;
use std::hash::Hasher;
use std::iter;

use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use tracing::debug;
use xxhash_rust::xxh3::Xxh3;

use crate::config::{COLLISION_TILE, ConfigError, MapConfig, MapId, Offset, TileCoord, WorldConfig};
use crate::dialogue::Dialogue;
use crate::entities::{
    AnimatedOverlay, Backdrop, Boundary, Door, ImageRef, Movable, Prompt, Renderer,
};
use crate::geometry::{Position, Rect};
use crate::input::{Direction, KeyState};

new_key_type! {
    pub struct BackdropId;
    pub struct BoundaryId;
    pub struct DoorId;
    pub struct PromptId;
    pub struct OverlayId;
}

/// Everything built for one map. Cached verbatim and restored on revisit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEntities {
    pub background: BackdropId,
    pub foreground: Option<BackdropId>,
    pub boundaries: Vec<BoundaryId>,
    pub doors: Vec<DoorId>,
    pub prompts: Vec<PromptId>,
    pub overlays: Vec<OverlayId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapLoad {
    Built,
    Cached,
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("map `{0}` is not defined")]
    UnknownMap(MapId),
}

#[derive(Default)]
struct Arenas {
    backdrops: SlotMap<BackdropId, Backdrop>,
    boundaries: SlotMap<BoundaryId, Boundary>,
    doors: SlotMap<DoorId, Door>,
    prompts: SlotMap<PromptId, Prompt>,
    overlays: SlotMap<OverlayId, AnimatedOverlay>,
}

struct ActiveMap {
    id: MapId,
    entities: MapEntities,
}

pub struct World {
    config: WorldConfig,
    arenas: Arenas,
    cache: HashMap<MapId, MapEntities>,
    active: ActiveMap,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = config.start.clone();
        let mut arenas = Arenas::default();
        let start_map =
            config.map(&start).ok_or_else(|| ConfigError::UnknownStartMap(start.clone()))?;
        let entities = build_entities(start_map, &mut arenas);
        debug!(map = %start, boundaries = entities.boundaries.len(), "start map built");

        let mut cache = HashMap::new();
        cache.insert(start.clone(), entities.clone());
        Ok(Self { config, arenas, cache, active: ActiveMap { id: start, entities } })
    }

    /// Make `id` the active map, reusing its cached entities when it was visited before.
    pub fn load_map(&mut self, id: &MapId) -> Result<MapLoad, WorldError> {
        if let Some(entities) = self.cache.get(id) {
            debug!(map = %id, "map restored from cache");
            self.active = ActiveMap { id: id.clone(), entities: entities.clone() };
            return Ok(MapLoad::Cached);
        }

        let map = self.config.map(id).ok_or_else(|| WorldError::UnknownMap(id.clone()))?;
        let entities = build_entities(map, &mut self.arenas);
        debug!(
            map = %id,
            boundaries = entities.boundaries.len(),
            doors = entities.doors.len(),
            prompts = entities.prompts.len(),
            "map built"
        );
        self.cache.insert(id.clone(), entities.clone());
        self.active = ActiveMap { id: id.clone(), entities };
        Ok(MapLoad::Built)
    }

    pub fn active_map(&self) -> &MapId {
        &self.active.id
    }

    pub fn active_entities(&self) -> &MapEntities {
        &self.active.entities
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn is_cached(&self, id: &MapId) -> bool {
        self.cache.contains_key(id)
    }

    pub fn cached_maps(&self) -> impl Iterator<Item = &MapId> + '_ {
        self.cache.keys()
    }

    pub fn background(&self) -> Option<&Backdrop> {
        self.arenas.backdrops.get(self.active.entities.background)
    }

    pub fn foreground(&self) -> Option<&Backdrop> {
        self.active.entities.foreground.and_then(|id| self.arenas.backdrops.get(id))
    }

    pub fn boundaries(&self) -> impl Iterator<Item = (BoundaryId, &Boundary)> + '_ {
        self.active
            .entities
            .boundaries
            .iter()
            .filter_map(|id| self.arenas.boundaries.get(*id).map(|boundary| (*id, boundary)))
    }

    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &Door)> + '_ {
        self.active
            .entities
            .doors
            .iter()
            .filter_map(|id| self.arenas.doors.get(*id).map(|door| (*id, door)))
    }

    pub fn prompts(&self) -> impl Iterator<Item = (PromptId, &Prompt)> + '_ {
        self.active
            .entities
            .prompts
            .iter()
            .filter_map(|id| self.arenas.prompts.get(*id).map(|prompt| (*id, prompt)))
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, &AnimatedOverlay)> + '_ {
        self.active
            .entities
            .overlays
            .iter()
            .filter_map(|id| self.arenas.overlays.get(*id).map(|overlay| (*id, overlay)))
    }

    pub fn draw_background(&self, renderer: &mut impl Renderer) {
        if let Some(background) = self.background() {
            background.draw(renderer);
        }
    }

    pub fn draw_overlays(&mut self, renderer: &mut impl Renderer) {
        for id in &self.active.entities.overlays {
            if let Some(overlay) = self.arenas.overlays.get_mut(*id) {
                overlay.draw(renderer);
            }
        }
    }

    pub fn draw_foreground(&self, renderer: &mut impl Renderer) {
        if let Some(foreground) = self.foreground() {
            foreground.draw(renderer);
        }
    }

    pub fn draw_zones(&self, renderer: &mut impl Renderer) {
        for (_, boundary) in self.boundaries() {
            boundary.draw(renderer);
        }
        for (_, door) in self.doors() {
            door.draw(renderer);
        }
        for (_, prompt) in self.prompts() {
            prompt.draw(renderer);
        }
    }

    /// Scroll every active map entity for this tick.
    pub fn apply_movement(&mut self, keys: &KeyState, blocked: Option<Direction>) {
        let entities = &self.active.entities;
        let arenas = &mut self.arenas;

        let backdrops = iter::once(entities.background).chain(entities.foreground);
        for id in backdrops {
            if let Some(backdrop) = arenas.backdrops.get_mut(id) {
                backdrop.handle_keyboard_input(keys, blocked);
            }
        }
        for id in &entities.overlays {
            if let Some(overlay) = arenas.overlays.get_mut(*id) {
                overlay.handle_keyboard_input(keys, blocked);
            }
        }
        for id in &entities.boundaries {
            if let Some(boundary) = arenas.boundaries.get_mut(*id) {
                boundary.handle_keyboard_input(keys, blocked);
            }
        }
        for id in &entities.doors {
            if let Some(door) = arenas.doors.get_mut(*id) {
                door.handle_keyboard_input(keys, blocked);
            }
        }
        for id in &entities.prompts {
            if let Some(prompt) = arenas.prompts.get_mut(*id) {
                prompt.handle_keyboard_input(keys, blocked);
            }
        }
    }

    /// Stable hash of the active map and the positions of its entities.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(self.active.id.as_str().as_bytes());
        let mut write_position = |position: Position| {
            hasher.write_u32(position.x.to_bits());
            hasher.write_u32(position.y.to_bits());
        };
        if let Some(background) = self.background() {
            write_position(background.position);
        }
        if let Some(foreground) = self.foreground() {
            write_position(foreground.position);
        }
        for (_, overlay) in self.overlays() {
            write_position(overlay.position);
        }
        for (_, boundary) in self.boundaries() {
            write_position(boundary.position);
        }
        for (_, door) in self.doors() {
            write_position(door.position);
        }
        for (_, prompt) in self.prompts() {
            write_position(prompt.position);
        }
        hasher.finish()
    }
}

fn place(tile: TileCoord, tile_pixels: f32, offset: Offset) -> Position {
    Position::new(
        tile.x as f32 * tile_pixels + offset.x,
        tile.y as f32 * tile_pixels + offset.y,
    )
}

fn build_entities(map: &MapConfig, arenas: &mut Arenas) -> MapEntities {
    let base = map.offset;
    let placement = map.placement_offset();
    let tile_pixels = map.tile_pixels();
    let base_position = Position::new(base.x, base.y);

    let background = arenas.backdrops.insert(Backdrop {
        image: ImageRef::new(map.background.as_str()),
        position: base_position,
    });
    let foreground = map.foreground.as_ref().map(|image| {
        arenas
            .backdrops
            .insert(Backdrop { image: ImageRef::new(image.as_str()), position: base_position })
    });

    let width = map.dimensions.width as usize;
    let boundaries = map
        .collisions
        .chunks(width)
        .enumerate()
        .flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                (*cell == COLLISION_TILE).then_some(TileCoord { x: col as u32, y: row as u32 })
            })
        })
        .map(|tile| {
            arenas.boundaries.insert(Boundary {
                position: place(tile, tile_pixels, base),
                width: tile_pixels,
                height: tile_pixels,
            })
        })
        .collect();

    let doors = map
        .doors
        .iter()
        .map(|door| {
            let rect = Rect::tile(
                place(door.position, tile_pixels, placement),
                map.zoom_scale,
                door.span.unwrap_or_default(),
            );
            arenas.doors.insert(Door {
                position: rect.position(),
                width: rect.w,
                height: rect.h,
                target: door.target.clone(),
                entry_direction: door.entry_direction,
            })
        })
        .collect();

    let prompts = map
        .prompts
        .iter()
        .map(|prompt| {
            let rect = Rect::tile(
                place(prompt.position, tile_pixels, placement),
                map.zoom_scale,
                prompt.span.unwrap_or_default(),
            );
            let dialogue = Dialogue { title: prompt.title.clone(), content: prompt.content.clone() };
            arenas.prompts.insert(Prompt::new(rect.position(), rect.w, rect.h, dialogue))
        })
        .collect();

    let overlays = map
        .animations
        .iter()
        .map(|animation| {
            arenas.overlays.insert(AnimatedOverlay::new(
                ImageRef::new(animation.image.as_str()),
                place(animation.position, tile_pixels, placement),
                animation.frames,
            ))
        })
        .collect();

    MapEntities { background, foreground, boundaries, doors, prompts, overlays }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{TILE_SIZE, VELOCITY};
    use crate::test_support::*;

    #[test]
    fn start_map_is_active_and_cached() {
        let world = World::new(two_map_config()).expect("world");
        assert_eq!(world.active_map(), &MapId::from("island"));
        assert!(world.is_cached(&MapId::from("island")));
        assert!(!world.is_cached(&MapId::from("museum")));
    }

    #[test]
    fn collision_grid_expands_into_positioned_boundaries() {
        let world = World::new(two_map_config()).expect("world");
        let tile = TILE_SIZE * 4.0;
        let positions: Vec<Position> =
            world.boundaries().map(|(_, boundary)| boundary.position).collect();
        // Island grid marks (col 1, row 0) and (col 2, row 1); offset is (-100, -50).
        assert_eq!(positions, vec![
            Position::new(tile - 100.0, -50.0),
            Position::new(2.0 * tile - 100.0, tile - 50.0),
        ]);
        assert!(world.boundaries().all(|(_, b)| b.width == tile && b.height == tile));
    }

    #[test]
    fn doors_use_span_and_last_position() {
        let mut config = two_map_config();
        if let Some(museum) = config.maps.get_mut(&MapId::from("museum")) {
            museum.last_position = Some(Offset { x: 10.0, y: 20.0 });
        }
        let mut world = World::new(config).expect("world");
        world.load_map(&MapId::from("museum")).expect("museum");

        let tile = TILE_SIZE * 3.5;
        let (_, door) = world.doors().next().expect("door");
        assert_eq!(door.rect(), Rect::new(10.0, 20.0, 2.0 * tile, tile));
        assert_eq!(door.target, MapId::from("island"));
        assert_eq!(door.entry_direction, Direction::South);
        let (_, prompt) = world.prompts().next().expect("prompt");
        assert_eq!(prompt.position, Position::new(tile + 10.0, 20.0));
        assert_eq!(world.background().map(|b| b.position), Some(Position::new(0.0, 0.0)));
    }

    #[test]
    fn revisit_restores_cached_entities_with_scrolled_positions() {
        let mut world = World::new(two_map_config()).expect("world");
        let first_visit = world.active_entities().clone();
        let mut keys = KeyState::default();
        keys.press(Direction::North);
        world.apply_movement(&keys, None);
        let scrolled: Vec<Position> = world.boundaries().map(|(_, b)| b.position).collect();

        assert_eq!(world.load_map(&MapId::from("museum")).expect("museum"), MapLoad::Built);
        assert_ne!(world.active_entities(), &first_visit);
        assert_eq!(world.boundaries().count(), 0);

        assert_eq!(world.load_map(&MapId::from("island")).expect("island"), MapLoad::Cached);
        assert_eq!(world.active_entities(), &first_visit);
        let restored: Vec<Position> = world.boundaries().map(|(_, b)| b.position).collect();
        assert_eq!(restored, scrolled);
        assert_eq!(restored[0].y, -50.0 + VELOCITY);
    }

    #[test]
    fn prompts_are_cached_with_their_map() {
        let mut world = World::new(two_map_config()).expect("world");
        assert_eq!(world.prompts().count(), 0);
        world.load_map(&MapId::from("museum")).expect("museum");
        let museum_prompts: Vec<PromptId> = world.prompts().map(|(id, _)| id).collect();
        assert_eq!(museum_prompts.len(), 1);

        world.load_map(&MapId::from("island")).expect("island");
        assert_eq!(world.prompts().count(), 0, "island must not see museum prompts");
        world.load_map(&MapId::from("museum")).expect("museum");
        let again: Vec<PromptId> = world.prompts().map(|(id, _)| id).collect();
        assert_eq!(again, museum_prompts);
    }

    #[test]
    fn unknown_map_is_an_error() {
        let mut world = World::new(two_map_config()).expect("world");
        assert!(matches!(
            world.load_map(&MapId::from("attic")),
            Err(WorldError::UnknownMap(id)) if id == MapId::from("attic")
        ));
        assert_eq!(world.active_map(), &MapId::from("island"));
    }

    #[test]
    fn blocked_tick_moves_nothing() {
        let mut world = World::new(two_map_config()).expect("world");
        let before = world.snapshot_hash();
        let mut keys = KeyState::default();
        keys.press(Direction::East);
        world.apply_movement(&keys, Some(Direction::East));
        assert_eq!(world.snapshot_hash(), before);
        world.apply_movement(&keys, None);
        assert_ne!(world.snapshot_hash(), before);
        let background = world.background().map(|b| b.position);
        assert_eq!(background, Some(Position::new(-100.0 - VELOCITY, -50.0)));
    }

    #[test]
    fn overlays_scroll_with_the_map() {
        let mut world = World::new(two_map_config()).expect("world");
        let (_, overlay) = world.overlays().next().expect("overlay");
        let start = overlay.position;
        let mut keys = KeyState::default();
        keys.press(Direction::West);
        world.apply_movement(&keys, None);
        let (_, overlay) = world.overlays().next().expect("overlay");
        assert_eq!(overlay.position, Position::new(start.x + VELOCITY, start.y));
    }

    #[test]
    fn snapshot_covers_foreground_and_overlays() {
        let mut world = World::new(two_map_config()).expect("world");
        let before = world.snapshot_hash();
        let overlay_id = world.active.entities.overlays[0];
        if let Some(overlay) = world.arenas.overlays.get_mut(overlay_id) {
            overlay.position.translate(0.0, VELOCITY);
        }
        let overlay_moved = world.snapshot_hash();
        assert_ne!(overlay_moved, before);

        let foreground_id = world.active.entities.foreground.expect("island foreground");
        if let Some(foreground) = world.arenas.backdrops.get_mut(foreground_id) {
            foreground.position.translate(VELOCITY, 0.0);
        }
        assert_ne!(world.snapshot_hash(), overlay_moved);
    }
}
