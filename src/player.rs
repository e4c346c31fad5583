use glam::Vec2;

/// World and viewport dimensions the integrator clamps against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub map: Vec2,
    pub viewport: Vec2,
}

/// Character position on the map plus the derived scroll offset.
#[derive(Debug)]
pub struct Player {
    position: Vec2,
    map_offset: Vec2,
    speed: f32,
    bounds: Bounds,
}

impl Player {
    pub fn new(start_pos: Vec2, speed: f32, bounds: Bounds) -> Self {
        let position = start_pos.clamp(Vec2::ZERO, bounds.map);
        Self {
            position,
            map_offset: map_offset(position, bounds),
            speed,
            bounds,
        }
    }

    /// 🚶 Step one tick along `direction`, returning the new map offset
    pub fn update(&mut self, direction: Vec2) -> Vec2 {
        let next = self.position + direction * self.speed;
        self.position = Vec2::new(
            next.x.max(0.0).min(self.bounds.map.x),
            next.y.max(0.0).min(self.bounds.map.y),
        );
        self.map_offset = map_offset(self.position, self.bounds);
        self.map_offset
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn map_offset(&self) -> Vec2 {
        self.map_offset
    }
}

/// Translation for the map layer that centers `position` in the viewport.
///
/// Each axis is bounded above by 0 and below by `viewport - map`, so the
/// map never scrolls past an edge. When the viewport is wider than the map
/// the upper bound wins.
pub fn map_offset(position: Vec2, bounds: Bounds) -> Vec2 {
    let axis = |pos: f32, viewport: f32, map: f32| {
        let centered = -pos + viewport / 2.0;
        centered.max(viewport - map).min(0.0)
    };
    Vec2::new(
        axis(position.x, bounds.viewport.x, bounds.map.x),
        axis(position.y, bounds.viewport.y, bounds.map.y),
    )
}
