mod game;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use macroquad::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game::GameState;
use joystick_walker::GameConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Walk a sprite around a scrolling map with a virtual joystick")]
struct Cli {
    /// JSON file overriding the built-in tunables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the sprite and map images
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,
}

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: "🕹️ Joystick Walker".to_owned(),
        window_width: config.movement.viewport_width as i32,
        window_height: config.movement.viewport_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    info!(
        map = ?(config.movement.map_width, config.movement.map_height),
        viewport = ?(config.movement.viewport_width, config.movement.viewport_height),
        speed = config.movement.move_speed,
        "config ready"
    );

    macroquad::Window::from_config(window_conf(&config), run(config, cli.assets));
    Ok(())
}

async fn run(config: GameConfig, assets: PathBuf) {
    let mut game = GameState::new(config, &assets).await;

    while game.is_running() {
        let dt = get_frame_time();

        // Update game state
        game.update(dt);

        // Draw everything
        game.draw();

        next_frame().await
    }
}
