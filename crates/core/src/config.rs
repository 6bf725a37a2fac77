//! Static map configuration: layouts, collision grids, doors, prompts and overlays.
//! This module exists to parse and validate map data before any of it reaches the world.
//! It does not own entity construction or caching.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialogue::ContentBlock;
use crate::geometry::{Span, TILE_SIZE};
use crate::input::Direction;

/// Collision grid value marking an impassable tile.
pub const COLLISION_TILE: u32 = 1025;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub String);

impl MapId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MapId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Column/row in a map's collision grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Pixel offset of a map's top-left corner relative to the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorDescriptor {
    pub target: MapId,
    pub entry_direction: Direction,
    pub position: TileCoord,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptDescriptor {
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub position: TileCoord,
    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub total: u32,
    /// Draws per animation frame.
    pub rate: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub image: String,
    pub position: TileCoord,
    pub frames: FrameSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub background: String,
    #[serde(default)]
    pub foreground: Option<String>,
    pub offset: Offset,
    /// Overrides `offset` when placing doors, prompts and overlays.
    #[serde(default)]
    pub last_position: Option<Offset>,
    pub dimensions: Dimensions,
    pub zoom_scale: f32,
    pub collisions: Vec<u32>,
    #[serde(default)]
    pub doors: Vec<DoorDescriptor>,
    #[serde(default)]
    pub prompts: Vec<PromptDescriptor>,
    #[serde(default)]
    pub animations: Vec<AnimationDescriptor>,
}

impl MapConfig {
    pub fn placement_offset(&self) -> Offset {
        self.last_position.unwrap_or(self.offset)
    }

    pub fn tile_pixels(&self) -> f32 {
        TILE_SIZE * self.zoom_scale
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read map config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML map config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON map config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported map config extension for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("start map `{0}` is not defined")]
    UnknownStartMap(MapId),
    #[error("map `{map}` has zero-sized dimensions")]
    EmptyDimensions { map: MapId },
    #[error("map `{map}` zoom scale must be positive and finite, got {zoom_scale}")]
    InvalidZoomScale { map: MapId, zoom_scale: f32 },
    #[error("map `{map}` collision grid has {actual} cells, expected {expected}")]
    CollisionGridSize { map: MapId, expected: usize, actual: usize },
    #[error("map `{map}` door {index} targets unknown map `{target}`")]
    UnknownDoorTarget { map: MapId, index: usize, target: MapId },
    #[error("map `{map}` {kind} {index} has an empty span")]
    EmptySpan { map: MapId, kind: &'static str, index: usize },
    #[error("map `{map}` prompt {index} has an empty title")]
    EmptyPromptTitle { map: MapId, index: usize },
    #[error("map `{map}` animation {index} needs a positive frame total and rate")]
    InvalidFrames { map: MapId, index: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub start: MapId,
    pub maps: BTreeMap<MapId, MapConfig>,
}

impl WorldConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn map(&self, id: &MapId) -> Option<&MapConfig> {
        self.maps.get(id)
    }

    /// Reject references and shapes that would otherwise poison a cache entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.maps.contains_key(&self.start) {
            return Err(ConfigError::UnknownStartMap(self.start.clone()));
        }
        for (id, map) in &self.maps {
            self.validate_map(id, map)?;
        }
        Ok(())
    }

    fn validate_map(&self, id: &MapId, map: &MapConfig) -> Result<(), ConfigError> {
        let Dimensions { width, height } = map.dimensions;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyDimensions { map: id.clone() });
        }
        if !map.zoom_scale.is_finite() || map.zoom_scale <= 0.0 {
            return Err(ConfigError::InvalidZoomScale {
                map: id.clone(),
                zoom_scale: map.zoom_scale,
            });
        }
        let expected = width as usize * height as usize;
        if map.collisions.len() != expected {
            return Err(ConfigError::CollisionGridSize {
                map: id.clone(),
                expected,
                actual: map.collisions.len(),
            });
        }

        for (index, door) in map.doors.iter().enumerate() {
            if !self.maps.contains_key(&door.target) {
                return Err(ConfigError::UnknownDoorTarget {
                    map: id.clone(),
                    index,
                    target: door.target.clone(),
                });
            }
            if door.span.is_some_and(is_empty_span) {
                return Err(ConfigError::EmptySpan { map: id.clone(), kind: "door", index });
            }
        }

        for (index, prompt) in map.prompts.iter().enumerate() {
            if prompt.title.trim().is_empty() {
                return Err(ConfigError::EmptyPromptTitle { map: id.clone(), index });
            }
            if prompt.span.is_some_and(is_empty_span) {
                return Err(ConfigError::EmptySpan { map: id.clone(), kind: "prompt", index });
            }
        }

        for (index, animation) in map.animations.iter().enumerate() {
            if animation.frames.total == 0 || animation.frames.rate == 0 {
                return Err(ConfigError::InvalidFrames { map: id.clone(), index });
            }
        }
        Ok(())
    }
}

fn is_empty_span(span: Span) -> bool {
    span.width == 0 || span.height == 0
}
