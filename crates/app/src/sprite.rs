//! Texture-backed implementation of the engine's drawing seam.

use std::collections::HashMap;
use std::path::Path;

use macroquad::prelude::{
    Color, DrawTextureParams, FilterMode, MAGENTA, Rect as SourceRect, Texture2D, WHITE,
    draw_rectangle_lines, draw_texture_ex, load_texture,
};
use overworld::{ImageRef, Position, Rect, Renderer, SpriteFrame, ZoneKind};
use tracing::{debug, warn};

const PLACEHOLDER_SIZE: f32 = 48.0;
const BOUNDARY_COLOR: Color = Color { r: 0.9, g: 0.2, b: 0.2, a: 0.8 };
const DOOR_COLOR: Color = Color { r: 0.2, g: 0.9, b: 0.3, a: 0.8 };
const PROMPT_COLOR: Color = Color { r: 0.3, g: 0.6, b: 1.0, a: 0.8 };

pub struct TextureRenderer {
    textures: HashMap<ImageRef, Texture2D>,
    debug_zones: bool,
}

impl TextureRenderer {
    /// Load every image up front. Missing files are reported once and drawn as outlines.
    pub async fn load(assets_dir: &Path, images: Vec<ImageRef>, debug_zones: bool) -> Self {
        let mut textures = HashMap::new();
        for image in images {
            let path = assets_dir.join(image.as_str());
            match load_texture(&path.to_string_lossy()).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    debug!(image = image.as_str(), "texture loaded");
                    textures.insert(image, texture);
                }
                Err(err) => {
                    let image = image.as_str();
                    warn!(image, error = %err, "texture missing, drawing placeholder");
                }
            }
        }
        Self { textures, debug_zones }
    }

    /// Size of one frame of a horizontal sprite sheet with `frames` frames.
    pub fn frame_size(&self, image: &ImageRef, frames: u32) -> Option<(f32, f32)> {
        let texture = self.textures.get(image)?;
        Some((texture.width() / frames.max(1) as f32, texture.height()))
    }
}

impl Renderer for TextureRenderer {
    fn draw_sprite(&mut self, image: &ImageRef, position: Position, frame: SpriteFrame) {
        let Some(texture) = self.textures.get(image) else {
            let (x, y) = (position.x, position.y);
            draw_rectangle_lines(x, y, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, 2.0, MAGENTA);
            return;
        };
        let frame_width = texture.width() / frame.total.max(1) as f32;
        let source_x = frame.index as f32 * frame_width;
        let source = SourceRect::new(source_x, 0.0, frame_width, texture.height());
        draw_texture_ex(texture, position.x, position.y, WHITE, DrawTextureParams {
            source: Some(source),
            ..Default::default()
        });
    }

    fn draw_zone(&mut self, kind: ZoneKind, rect: Rect) {
        if !self.debug_zones {
            return;
        }
        let color = match kind {
            ZoneKind::Boundary => BOUNDARY_COLOR,
            ZoneKind::Door => DOOR_COLOR,
            ZoneKind::Prompt => PROMPT_COLOR,
        };
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, color);
    }
}
