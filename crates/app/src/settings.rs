//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

pub const MAPS_VAR: &str = "OVERWORLD_MAPS";
pub const ASSETS_VAR: &str = "OVERWORLD_ASSETS";
pub const DEBUG_ZONES_VAR: &str = "OVERWORLD_DEBUG_ZONES";
pub const UI_SCALE_VAR: &str = "OVERWORLD_UI_SCALE";

pub const DEFAULT_MAPS_PATH: &str = "crates/app/assets/maps.toml";
pub const DEFAULT_ASSETS_DIR: &str = "crates/app/assets";

pub const DEFAULT_UI_SCALE: f32 = 1.0;
pub const MIN_UI_SCALE: f32 = 0.5;
pub const MAX_UI_SCALE: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub maps_path: PathBuf,
    pub assets_dir: PathBuf,
    /// Outline boundaries, doors and prompts on top of the map.
    pub debug_zones: bool,
    pub ui_scale: f32,
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let maps_path = lookup(MAPS_VAR).unwrap_or_else(|| DEFAULT_MAPS_PATH.to_string());
        let assets_dir = lookup(ASSETS_VAR).unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string());
        let debug_zones = lookup(DEBUG_ZONES_VAR).is_some_and(|raw| is_truthy(&raw));
        let ui_scale = lookup(UI_SCALE_VAR)
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .map_or(DEFAULT_UI_SCALE, clamp_ui_scale);
        Self {
            maps_path: PathBuf::from(maps_path),
            assets_dir: PathBuf::from(assets_dir),
            debug_zones,
            ui_scale,
        }
    }
}

pub fn clamp_ui_scale(value: f32) -> f32 {
    if !value.is_finite() {
        return DEFAULT_UI_SCALE;
    }
    value.clamp(MIN_UI_SCALE, MAX_UI_SCALE)
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
