//! Virtual-joystick walker: drag a stick to walk a four-way animated
//! character across a map that scrolls beneath a fixed viewport.

pub mod animation;
pub mod config;
pub mod controller;
pub mod joystick;
pub mod player;

pub use animation::{Animator, Facing, FacingState, SpriteCatalog, SpriteFrame};
pub use config::{ConfigError, GameConfig, MovementConfig};
pub use controller::{Controller, LoopState, PointerFrame, RenderSink};
pub use joystick::{normalize_drag, Anchor, DragSample, Joystick};
pub use player::{map_offset, Bounds, Player};
