use glam::IVec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tq_core::TileDensity;

use crate::world::EdgePolicy;

/// Game settings. Every field has a default, so a config file only needs the
/// values it changes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default = "default_screen_width")]
    pub screen_width: i32,
    #[serde(default = "default_screen_height")]
    pub screen_height: i32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Enemies move on frames where `frame_count % interval == 0`.
    #[serde(default = "default_enemy_update_interval")]
    pub enemy_update_interval: u32,
    /// Held-button auto-repeat period in frames; 0 disables repeat.
    #[serde(default = "default_key_repeat_period")]
    pub key_repeat_period: u32,
    #[serde(default)]
    pub player_spawn: SpawnPoint,
    #[serde(default)]
    pub start_world: usize,
    #[serde(default)]
    pub edge_policy: EdgePolicy,
    #[serde(default)]
    pub tile_density: TileDensity,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self { x: 16, y: 150 }
    }
}

impl From<SpawnPoint> for IVec2 {
    fn from(p: SpawnPoint) -> Self {
        IVec2::new(p.x, p.y)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            frame_rate: default_frame_rate(),
            enemy_update_interval: default_enemy_update_interval(),
            key_repeat_period: default_key_repeat_period(),
            player_spawn: SpawnPoint::default(),
            start_world: 0,
            edge_policy: EdgePolicy::default(),
            tile_density: TileDensity::default(),
        }
    }
}

impl GameConfig {
    pub fn screen(&self) -> IVec2 {
        IVec2::new(self.screen_width, self.screen_height)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.screen_width <= 0 || config.screen_height <= 0 {
        return Err("Config validation failed: screen size must be > 0".to_string());
    }
    if config.frame_rate == 0 {
        return Err("Config validation failed: frame_rate must be > 0".to_string());
    }
    if config.enemy_update_interval == 0 {
        return Err("Config validation failed: enemy_update_interval must be > 0".to_string());
    }
    if config.key_repeat_period == 0 {
        log::warn!("key_repeat_period is 0: held buttons will only move on the press frame.");
    }
    Ok(())
}

const fn default_screen_width() -> i32 {
    220
}

const fn default_screen_height() -> i32 {
    176
}

const fn default_frame_rate() -> u32 {
    60
}

const fn default_enemy_update_interval() -> u32 {
    4
}

const fn default_key_repeat_period() -> u32 {
    1
}
