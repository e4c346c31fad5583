//! Per-tick driver tying joystick input to movement, scrolling and animation.
//!
//! The host owns the run loop: it forwards pointer events to the
//! `on_input_*` methods as they arrive and calls [`Controller::tick`] once
//! per frame with the elapsed time. Everything the host should paint is
//! pushed through a [`RenderSink`].

use glam::Vec2;
use tracing::{debug, info};

use crate::animation::{Animator, FacingState, SpriteCatalog};
use crate::config::MovementConfig;
use crate::joystick::Joystick;
use crate::player::{Bounds, Player};

/// Receives the values the host needs to draw.
pub trait RenderSink {
    /// Translation of the map layer.
    fn map_offset(&mut self, offset: Vec2);
    /// Sprite id for the character.
    fn sprite(&mut self, id: &str);
    /// Translation of the stick relative to the joystick center.
    fn stick_offset(&mut self, offset: Vec2);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Active,
}

/// Button state of a polled pointer (mouse) for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub pos: Vec2,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

pub struct Controller {
    joystick: Joystick,
    player: Player,
    animator: Animator,
    catalog: SpriteCatalog,
    clock: f64,
    running: bool,
}

impl Controller {
    pub fn new(config: &MovementConfig, catalog: SpriteCatalog) -> Self {
        let bounds = Bounds {
            map: Vec2::new(config.map_width, config.map_height),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
        };
        Self {
            joystick: Joystick::new(config.joystick_anchor(), config.max_stick_radius),
            player: Player::new(Vec2::new(config.start_x, config.start_y), config.move_speed, bounds),
            animator: Animator::new(f64::from(config.frame_interval_ms) / 1000.0),
            catalog,
            clock: 0.0,
            running: true,
        }
    }

    /// Pushes the starting picture: map offset, stick at rest and the first
    /// sprite facing down.
    pub fn prime(&self, sink: &mut impl RenderSink) {
        sink.map_offset(self.player.map_offset());
        sink.stick_offset(Vec2::ZERO);
        if let Some(first) = self.catalog.down.first() {
            sink.sprite(first);
        }
    }

    /// Press at `pos`. Starts a drag session only on the joystick control.
    pub fn on_input_start(&mut self, pos: Vec2, sink: &mut impl RenderSink) {
        if self.joystick.on_touch_start(pos) {
            debug!(x = pos.x, y = pos.y, "drag started");
            sink.stick_offset(self.joystick.stick_offset());
        }
    }

    pub fn on_input_move(&mut self, pos: Vec2, sink: &mut impl RenderSink) {
        if !self.joystick.active {
            return;
        }
        self.joystick.on_touch_move(pos);
        sink.stick_offset(self.joystick.stick_offset());
    }

    /// Release. Recenters the stick and shows the idle pose.
    pub fn on_input_end(&mut self, sink: &mut impl RenderSink) {
        if !self.joystick.active {
            return;
        }
        self.joystick.on_touch_end();
        sink.stick_offset(Vec2::ZERO);
        if let Some(idle) = self.animator.reset_to_idle() {
            sink.sprite(self.catalog.sprite(idle));
        }
        debug!("drag ended");
    }

    /// Applies one frame of sampled button state. A press and a release in
    /// the same frame both take effect, so a quick tap never leaves the
    /// session open.
    pub fn on_pointer(&mut self, pointer: PointerFrame, sink: &mut impl RenderSink) {
        if pointer.pressed {
            self.on_input_start(pointer.pos, sink);
        } else if pointer.down {
            self.on_input_move(pointer.pos, sink);
        }
        if pointer.released {
            self.on_input_end(sink);
        }
    }

    /// 🎮 Advance one frame. `dt` is the elapsed time in seconds.
    ///
    /// While idle only the clock moves; while active the player steps first
    /// and the facing is derived from the same direction.
    pub fn tick(&mut self, dt: f32, sink: &mut impl RenderSink) {
        if !self.running {
            return;
        }
        self.clock += f64::from(dt);
        if self.state() == LoopState::Idle {
            return;
        }

        let direction = self.joystick.direction();
        let offset = self.player.update(direction);
        sink.map_offset(offset);

        if let Some(frame) = self.animator.update(direction, self.clock, &self.catalog) {
            sink.sprite(self.catalog.sprite(frame));
        }
    }

    pub fn state(&self) -> LoopState {
        if self.joystick.active && self.joystick.direction() != Vec2::ZERO {
            LoopState::Active
        } else {
            LoopState::Idle
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(clock = self.clock, "run loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> Vec2 {
        self.player.position()
    }

    pub fn map_offset(&self) -> Vec2 {
        self.player.map_offset()
    }

    pub fn facing(&self) -> Option<FacingState> {
        self.animator.state()
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Nothing;

    impl RenderSink for Nothing {
        fn map_offset(&mut self, _: Vec2) {}
        fn sprite(&mut self, _: &str) {}
        fn stick_offset(&mut self, _: Vec2) {}
    }

    #[derive(Default)]
    struct Sprites(Vec<String>);

    impl RenderSink for Sprites {
        fn map_offset(&mut self, _: Vec2) {}
        fn sprite(&mut self, id: &str) {
            self.0.push(id.to_owned());
        }
        fn stick_offset(&mut self, _: Vec2) {}
    }

    fn controller() -> Controller {
        Controller::new(&MovementConfig::default(), SpriteCatalog::default())
    }

    #[test]
    fn idle_ticks_do_nothing() {
        let mut c = controller();
        let start = c.position();
        for _ in 0..10 {
            c.tick(0.016, &mut Nothing);
        }
        assert_eq!(c.position(), start);
        assert_eq!(c.facing(), None);
        assert_eq!(c.state(), LoopState::Idle);
    }

    #[test]
    fn press_at_center_stays_idle() {
        let mut c = controller();
        let center = c.joystick().anchor.center();
        c.on_input_start(center, &mut Nothing);
        assert!(c.joystick().active);
        assert_eq!(c.state(), LoopState::Idle);

        c.tick(0.016, &mut Nothing);
        assert_eq!(c.position(), Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn drag_moves_player_then_stops_on_release() {
        let mut c = controller();
        let center = c.joystick().anchor.center();
        c.on_input_start(center, &mut Nothing);
        c.on_input_move(center + Vec2::new(0.0, 30.0), &mut Nothing);
        assert_eq!(c.state(), LoopState::Active);

        c.tick(0.016, &mut Nothing);
        c.tick(0.016, &mut Nothing);
        assert_eq!(c.position(), Vec2::new(1000.0, 1010.0));

        c.on_input_end(&mut Nothing);
        assert_eq!(c.state(), LoopState::Idle);
        c.tick(0.016, &mut Nothing);
        assert_eq!(c.position(), Vec2::new(1000.0, 1010.0));
    }

    #[test]
    fn stopped_controller_ignores_ticks() {
        let mut c = controller();
        let center = c.joystick().anchor.center();
        c.on_input_start(center + Vec2::new(30.0, 0.0), &mut Nothing);
        assert!(c.is_running());

        c.stop();
        assert!(!c.is_running());
        let mut sprites = Sprites::default();
        c.tick(0.5, &mut sprites);
        assert_eq!(c.position(), Vec2::new(1000.0, 1000.0));
        assert!(sprites.0.is_empty());
        assert_eq!(c.clock, 0.0);
    }

    #[test]
    fn walk_cycle_keeps_running_after_days_of_uptime() {
        let mut c = controller();
        c.clock = 600_000.0;
        let center = c.joystick().anchor.center();
        c.on_input_start(center + Vec2::new(30.0, 0.0), &mut Nothing);

        let mut sprites = Sprites::default();
        for _ in 0..600 {
            c.tick(1.0 / 60.0, &mut sprites);
        }
        assert!(c.clock > 600_009.0);
        // ten seconds at one frame per 200ms
        assert!(sprites.0.len() >= 40, "{} frames", sprites.0.len());
    }

    #[test]
    fn tap_within_one_frame_closes_the_session() {
        let mut c = controller();
        let pos = c.joystick().anchor.center() + Vec2::new(0.0, 30.0);
        let tap = PointerFrame { pos, pressed: true, down: true, released: true };
        c.on_pointer(tap, &mut Nothing);

        assert!(!c.joystick().active);
        assert_eq!(c.state(), LoopState::Idle);
        c.tick(0.016, &mut Nothing);
        assert_eq!(c.position(), Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn held_pointer_drags_until_released() {
        let mut c = controller();
        let center = c.joystick().anchor.center();
        let frame = |pos, pressed, down, released| PointerFrame { pos, pressed, down, released };

        c.on_pointer(frame(center, true, true, false), &mut Nothing);
        c.on_pointer(frame(center + Vec2::new(-40.0, 0.0), false, true, false), &mut Nothing);
        c.tick(0.016, &mut Nothing);
        assert_eq!(c.position(), Vec2::new(995.0, 1000.0));

        c.on_pointer(frame(center, false, false, true), &mut Nothing);
        assert!(!c.joystick().active);
    }
}
