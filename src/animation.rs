//! Four-way walk cycle driven by the joystick direction.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Facing for a non-zero direction, picked by dominant axis.
    ///
    /// The horizontal test is strict, so `|dx| == |dy|` faces up or down.
    pub fn from_direction(dir: Vec2) -> Facing {
        if dir.x.abs() > dir.y.abs() {
            if dir.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if dir.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered sprite identifiers for each facing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteCatalog {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        let seq = |key: &str| (1..=4).map(|i| format!("{key}_{i}.png")).collect();
        Self {
            up: seq("up"),
            down: seq("down"),
            left: seq("left"),
            right: seq("right"),
        }
    }
}

impl SpriteCatalog {
    pub fn sequence(&self, facing: Facing) -> &[String] {
        match facing {
            Facing::Up => &self.up,
            Facing::Down => &self.down,
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }

    /// Sprite id for a frame. Falls back to "" for an empty sequence,
    /// which config validation rejects up front.
    pub fn sprite(&self, frame: SpriteFrame) -> &str {
        let seq = self.sequence(frame.facing);
        if seq.is_empty() {
            return "";
        }
        &seq[frame.index % seq.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        Facing::ALL
            .into_iter()
            .flat_map(move |f| self.sequence(f).iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub facing: Facing,
    pub index: usize,
}

/// Current facing, frame index and the clock time of the last frame change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingState {
    pub facing: Facing,
    pub frame_index: usize,
    pub last_change: f64,
}

#[derive(Debug)]
pub struct Animator {
    /// Seconds between walk frames.
    frame_interval: f64,
    state: Option<FacingState>,
}

impl Animator {
    pub fn new(frame_interval: f64) -> Self {
        Self { frame_interval, state: None }
    }

    /// Picks the facing for `direction` at clock time `now` and advances the
    /// frame if the interval has elapsed or the facing changed.
    ///
    /// Returns the new frame when it changed, `None` when the displayed
    /// sprite stays as is.
    pub fn update(&mut self, direction: Vec2, now: f64, catalog: &SpriteCatalog) -> Option<SpriteFrame> {
        let facing = Facing::from_direction(direction);
        let (previous, frame_index, last_change) = match self.state {
            Some(s) => (Some(s.facing), s.frame_index, s.last_change),
            None => (None, 0, 0.0),
        };

        let interval_elapsed = now - last_change >= self.frame_interval;
        let facing_changed = previous != Some(facing);
        if !(interval_elapsed || facing_changed) {
            return None;
        }

        let len = catalog.sequence(facing).len().max(1);
        let index = (frame_index + 1) % len;
        self.state = Some(FacingState {
            facing,
            frame_index: index,
            last_change: now,
        });

        if facing_changed {
            tracing::trace!(from = ?previous, to = %facing, "facing changed");
        }
        Some(SpriteFrame { facing, index })
    }

    /// Idle pose: first frame of the last facing, if there ever was one.
    pub fn reset_to_idle(&mut self) -> Option<SpriteFrame> {
        let state = self.state.as_mut()?;
        state.frame_index = 0;
        Some(SpriteFrame { facing: state.facing, index: 0 })
    }

    pub fn state(&self) -> Option<FacingState> {
        self.state
    }
}
