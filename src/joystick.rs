use glam::Vec2;

/// Screen-space rectangle of the joystick control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Anchor {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.left
            && pos.x <= self.left + self.width
            && pos.y >= self.top
            && pos.y <= self.top + self.height
    }
}

/// One normalized pointer reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Unit vector toward the pointer, or zero at the exact center.
    pub direction: Vec2,
    /// Where to draw the stick relative to the center, at most `max_radius` away.
    pub stick_offset: Vec2,
}

/// Converts a pointer position into a pure direction plus a cosmetic stick offset.
///
/// The direction never carries the drag distance: any pointer off center maps
/// to a unit vector.
pub fn normalize_drag(pointer: Vec2, center: Vec2, max_radius: f32) -> DragSample {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let magnitude = (dx * dx + dy * dy).sqrt();

    let direction = if magnitude == 0.0 {
        Vec2::ZERO
    } else {
        Vec2::new(dx / magnitude, dy / magnitude)
    };

    let distance = max_radius.min(magnitude);
    let angle = dy.atan2(dx);
    let stick_offset = Vec2::new(angle.cos() * distance, angle.sin() * distance);

    DragSample { direction, stick_offset }
}

/// 🕹️ Virtual joystick fed by mouse or the first touch
#[derive(Debug, Clone)]
pub struct Joystick {
    pub anchor: Anchor,
    /// Max stick travel (radius)
    pub max_radius: f32,
    /// Is a drag session in progress?
    pub active: bool,
    direction: Vec2,
    stick_offset: Vec2,
}

impl Joystick {
    pub fn new(anchor: Anchor, max_radius: f32) -> Self {
        Self {
            anchor,
            max_radius,
            active: false,
            direction: Vec2::ZERO,
            stick_offset: Vec2::ZERO,
        }
    }

    /// 🖱️ Press - starts a drag session if the press lands on the control.
    ///
    /// Returns whether a session was started.
    pub fn on_touch_start(&mut self, pos: Vec2) -> bool {
        if !self.anchor.contains(pos) {
            return false;
        }
        self.active = true;
        self.apply(pos);
        true
    }

    /// 🖱️ Drag - ignored outside a session
    pub fn on_touch_move(&mut self, pos: Vec2) {
        if !self.active {
            return;
        }
        self.apply(pos);
    }

    /// 🖱️ Release - ends the session and recenters the stick
    pub fn on_touch_end(&mut self) {
        self.active = false;
        self.direction = Vec2::ZERO;
        self.stick_offset = Vec2::ZERO;
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn stick_offset(&self) -> Vec2 {
        self.stick_offset
    }

    fn apply(&mut self, pos: Vec2) {
        let sample = normalize_drag(pos, self.anchor.center(), self.max_radius);
        self.direction = sample.direction;
        self.stick_offset = sample.stick_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn stick() -> Joystick {
        // centered on (100, 500)
        Joystick::new(Anchor::new(50.0, 450.0, 100.0, 100.0), 50.0)
    }

    #[test]
    fn direction_is_unit_length_off_center() {
        for (x, y) in [(3.0, 4.0), (-0.001, 0.0), (250.0, -90.0), (-7.5, -7.5)] {
            let s = normalize_drag(Vec2::new(x, y), Vec2::ZERO, 50.0);
            assert!((s.direction.length() - 1.0).abs() < EPS, "({x}, {y})");
        }
    }

    #[test]
    fn exact_center_yields_zero_not_nan() {
        let s = normalize_drag(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 50.0);
        assert_eq!(s.direction, Vec2::ZERO);
        assert_eq!(s.stick_offset, Vec2::ZERO);
    }

    #[test]
    fn stick_offset_is_capped_at_radius() {
        let s = normalize_drag(Vec2::new(300.0, 400.0), Vec2::ZERO, 50.0);
        assert!((s.stick_offset.length() - 50.0).abs() < 1e-3);
        assert!((s.stick_offset.x - 30.0).abs() < 1e-3);
        assert!((s.stick_offset.y - 40.0).abs() < 1e-3);

        let near = normalize_drag(Vec2::new(3.0, 4.0), Vec2::ZERO, 50.0);
        assert!((near.stick_offset.x - 3.0).abs() < EPS);
        assert!((near.stick_offset.y - 4.0).abs() < EPS);
    }

    #[test]
    fn press_outside_control_does_not_start_session() {
        let mut js = stick();
        assert!(!js.on_touch_start(Vec2::new(400.0, 100.0)));
        assert!(!js.active);

        js.on_touch_move(Vec2::new(500.0, 500.0));
        assert_eq!(js.direction(), Vec2::ZERO);
    }

    #[test]
    fn session_tracks_moves_anywhere_until_release() {
        let mut js = stick();
        assert!(js.on_touch_start(Vec2::new(100.0, 500.0)));
        assert_eq!(js.direction(), Vec2::ZERO);

        // far outside the control, still tracked
        js.on_touch_move(Vec2::new(700.0, 500.0));
        assert!((js.direction().x - 1.0).abs() < EPS);
        assert!((js.stick_offset().x - 50.0).abs() < 1e-3);

        js.on_touch_end();
        assert!(!js.active);
        assert_eq!(js.direction(), Vec2::ZERO);
        assert_eq!(js.stick_offset(), Vec2::ZERO);
    }
}
