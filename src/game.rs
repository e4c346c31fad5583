use std::collections::HashMap;
use std::path::Path;

use ::glam::Vec2 as CoreVec2;
use macroquad::prelude::*;
use tracing::{debug, warn};

use joystick_walker::{Controller, GameConfig, MovementConfig, PointerFrame, RenderSink};

const CHARACTER_SIZE: f32 = 48.0;
const GRID_STEP: f32 = 100.0;
const STICK_RADIUS: f32 = 20.0;

// Helpers to convert between the walker's Vec2 and Macroquad's Vec2
fn to_mac_vec2(v: CoreVec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn from_mac_vec2(v: Vec2) -> CoreVec2 {
    CoreVec2::new(v.x, v.y)
}

/// What the controller last asked us to paint.
#[derive(Debug, Default)]
struct Scene {
    map_offset: Vec2,
    sprite: String,
    stick_offset: Vec2,
}

impl RenderSink for Scene {
    fn map_offset(&mut self, offset: CoreVec2) {
        self.map_offset = to_mac_vec2(offset);
    }

    fn sprite(&mut self, id: &str) {
        if self.sprite != id {
            self.sprite.clear();
            self.sprite.push_str(id);
        }
    }

    fn stick_offset(&mut self, offset: CoreVec2) {
        self.stick_offset = to_mac_vec2(offset);
    }
}

pub struct GameState {
    controller: Controller,
    scene: Scene,
    movement: MovementConfig,
    sprites: HashMap<String, Texture2D>,
    map_texture: Option<Texture2D>,
    touch_id: Option<u64>,
}

impl GameState {
    pub async fn new(config: GameConfig, assets: &Path) -> Self {
        let mut sprites = HashMap::new();
        for id in config.sprites.iter() {
            if sprites.contains_key(id) {
                continue;
            }
            if let Some(texture) = load_sprite(assets, id).await {
                sprites.insert(id.to_owned(), texture);
            }
        }

        let map_texture = match &config.map_texture {
            Some(name) => load_sprite(assets, name).await,
            None => None,
        };
        debug!(loaded = sprites.len(), "sprite textures ready");

        let controller = Controller::new(&config.movement, config.sprites);
        let mut scene = Scene::default();
        controller.prime(&mut scene);

        Self {
            controller,
            scene,
            movement: config.movement,
            sprites,
            map_texture,
            touch_id: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn update(&mut self, dt: f32) {
        if is_key_pressed(KeyCode::Escape) {
            self.controller.stop();
            return;
        }

        self.handle_input();
        self.controller.tick(dt, &mut self.scene);
    }

    fn handle_input(&mut self) {
        let touches = touches();

        // Only the first contact drives the stick
        for touch in &touches {
            let pos = from_mac_vec2(touch.position);

            match touch.phase {
                TouchPhase::Started => {
                    if self.touch_id.is_none() {
                        self.controller.on_input_start(pos, &mut self.scene);
                        if self.controller.joystick().active {
                            self.touch_id = Some(touch.id);
                        }
                    }
                }
                TouchPhase::Moved | TouchPhase::Stationary => {
                    if Some(touch.id) == self.touch_id {
                        self.controller.on_input_move(pos, &mut self.scene);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    if Some(touch.id) == self.touch_id {
                        self.controller.on_input_end(&mut self.scene);
                        self.touch_id = None;
                    }
                }
            }
        }

        // Fallback to mouse for desktop
        if touches.is_empty() {
            let (x, y) = mouse_position();
            let pointer = PointerFrame {
                pos: CoreVec2::new(x, y),
                pressed: is_mouse_button_pressed(MouseButton::Left),
                down: is_mouse_button_down(MouseButton::Left),
                released: is_mouse_button_released(MouseButton::Left),
            };
            self.controller.on_pointer(pointer, &mut self.scene);
        }
    }

    pub fn draw(&self) {
        clear_background(Color::from_rgba(20, 24, 20, 255));

        self.draw_map();
        self.draw_character();
        self.draw_joystick();
    }

    fn draw_map(&self) {
        let offset = self.scene.map_offset;
        let map_w = self.movement.map_width;
        let map_h = self.movement.map_height;

        if let Some(texture) = &self.map_texture {
            draw_texture_ex(
                texture,
                offset.x,
                offset.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(map_w, map_h)),
                    ..Default::default()
                },
            );
            return;
        }

        // Procedural grass with a grid so scrolling is visible
        draw_rectangle(offset.x, offset.y, map_w, map_h, Color::from_rgba(58, 110, 62, 255));
        let line = Color::from_rgba(74, 132, 78, 255);
        let view_w = screen_width();
        let view_h = screen_height();

        let mut x = 0.0;
        while x <= map_w {
            let sx = x + offset.x;
            if (0.0..=view_w).contains(&sx) {
                draw_line(sx, offset.y.max(0.0), sx, (offset.y + map_h).min(view_h), 1.0, line);
            }
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y <= map_h {
            let sy = y + offset.y;
            if (0.0..=view_h).contains(&sy) {
                draw_line(offset.x.max(0.0), sy, (offset.x + map_w).min(view_w), sy, 1.0, line);
            }
            y += GRID_STEP;
        }

        // Map border
        draw_rectangle_lines(offset.x, offset.y, map_w, map_h, 4.0, Color::from_rgba(30, 60, 32, 255));
    }

    fn draw_character(&self) {
        let screen = to_mac_vec2(self.controller.position()) + self.scene.map_offset;
        let half = CHARACTER_SIZE / 2.0;

        match self.sprites.get(&self.scene.sprite) {
            Some(texture) => draw_texture_ex(
                texture,
                screen.x - half,
                screen.y - half,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(CHARACTER_SIZE, CHARACTER_SIZE)),
                    ..Default::default()
                },
            ),
            None => {
                // Placeholder body plus the sprite id it stands in for
                draw_rectangle(screen.x - half, screen.y - half, CHARACTER_SIZE, CHARACTER_SIZE, Color::from_rgba(230, 190, 90, 255));
                draw_rectangle_lines(screen.x - half, screen.y - half, CHARACTER_SIZE, CHARACTER_SIZE, 2.0, Color::from_rgba(90, 60, 20, 255));
                draw_text(&self.scene.sprite, screen.x - half, screen.y - half - 6.0, 16.0, WHITE);
            }
        }
    }

    fn draw_joystick(&self) {
        let anchor = self.controller.joystick().anchor;
        let center = to_mac_vec2(anchor.center());
        let base_radius = anchor.width.min(anchor.height) / 2.0;
        let alpha = if self.controller.joystick().active { 140 } else { 80 };

        // Base ring
        draw_circle(center.x, center.y, base_radius, Color::from_rgba(255, 255, 255, alpha / 3));
        draw_circle_lines(center.x, center.y, base_radius, 2.0, Color::from_rgba(255, 255, 255, alpha));

        // Stick
        let stick = center + self.scene.stick_offset;
        draw_circle(stick.x, stick.y, STICK_RADIUS, Color::from_rgba(255, 255, 255, alpha));
    }
}

async fn load_sprite(assets: &Path, id: &str) -> Option<Texture2D> {
    let path = assets.join(id);
    let path = path.to_string_lossy();
    match load_texture(&path).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(err) => {
            warn!(%path, error = %err, "texture unavailable, drawing placeholder");
            None
        }
    }
}
