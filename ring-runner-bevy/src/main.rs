//! Ring Runner 3D - lane runner/collector
//!
//! A box on a lane collects yellow rings and dies on blue ones.
//! Physics runs in the simulation crate; this client renders it.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowMode;

use ring_runner::GameConfig;

use game::{GamePlugin, Settings};
use ui::UiPlugin;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "RING_RUNNER_CONFIG";

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    GameOver,
}

fn main() {
    let (config, config_error) = load_config();

    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ring Runner".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        // One physics step per fixed tick
        .insert_resource(Time::<Fixed>::from_hz(config.world.tick_rate as f64))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Settings(config))
        .insert_resource(ConfigWarning(config_error))
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((GamePlugin, UiPlugin))
        .add_systems(Startup, report_config)
        .run();
}

/// Config load failure, reported once the log plugin is up.
#[derive(Resource)]
struct ConfigWarning(Option<String>);

/// Read the config named by `RING_RUNNER_CONFIG`, falling back to defaults.
fn load_config() -> (GameConfig, Option<String>) {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return (GameConfig::default(), None);
    };

    match GameConfig::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (GameConfig::default(), Some(format!("{}; using defaults", e))),
    }
}

fn report_config(warning: Res<ConfigWarning>, settings: Res<Settings>) {
    if let Some(message) = &warning.0 {
        warn!("{}", message);
    }

    info!(
        "Ring Runner initialized: {} Hz, {} powerups, {} enemies",
        settings.0.world.tick_rate, settings.0.rings.powerup_count, settings.0.rings.enemy_count
    );
}
