//! Tunables for the walker, loadable from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{Facing, SpriteCatalog};
use crate::joystick::Anchor;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("start position ({x}, {y}) lies outside the {width}x{height} map")]
    StartOutsideMap { x: f32, y: f32, width: f32, height: f32 },
    #[error("no sprites listed for facing `{0}`")]
    EmptySequence(Facing),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance per tick while the stick is held.
    pub move_speed: f32,
    pub map_width: f32,
    pub map_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub frame_interval_ms: f32,
    /// How far the stick visual may travel from the center.
    pub max_stick_radius: f32,
    pub start_x: f32,
    pub start_y: f32,
    /// Side of the square joystick control.
    pub joystick_size: f32,
    /// Gap between the control and the bottom-left viewport corner.
    pub joystick_margin: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            map_width: 2000.0,
            map_height: 2000.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            frame_interval_ms: 200.0,
            max_stick_radius: 50.0,
            start_x: 1000.0,
            start_y: 1000.0,
            joystick_size: 100.0,
            joystick_margin: 40.0,
        }
    }
}

impl MovementConfig {
    /// Joystick rectangle, pinned to the bottom-left of the viewport.
    pub fn joystick_anchor(&self) -> Anchor {
        Anchor::new(
            self.joystick_margin,
            self.viewport_height - self.joystick_margin - self.joystick_size,
            self.joystick_size,
            self.joystick_size,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("map_width", self.map_width),
            ("map_height", self.map_height),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("frame_interval_ms", self.frame_interval_ms),
            ("max_stick_radius", self.max_stick_radius),
            ("joystick_size", self.joystick_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let on_map = |v: f32, max: f32| v.is_finite() && (0.0..=max).contains(&v);
        if !on_map(self.start_x, self.map_width) || !on_map(self.start_y, self.map_height) {
            return Err(ConfigError::StartOutsideMap {
                x: self.start_x,
                y: self.start_y,
                width: self.map_width,
                height: self.map_height,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub sprites: SpriteCatalog,
    /// Optional background image for the map, relative to the asset dir.
    pub map_texture: Option<String>,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        for facing in Facing::ALL {
            if self.sprites.sequence(facing).is_empty() {
                return Err(ConfigError::EmptySequence(facing));
            }
        }
        Ok(())
    }
}
