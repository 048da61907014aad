//! Game module - runs the simulation and mirrors it into the scene
//!
//! Rules:
//! - Yellow ring = +1 point, ring goes back to the far end
//! - Blue ring = game over, lane clears, the box is flung past the camera
//! - One physics step per fixed tick

use bevy::prelude::*;
use ring_runner::game::GameEvent;
use ring_runner::{tick, GameConfig, RunPhase, RunState};

use crate::AppState;

pub mod components;
pub mod player;
pub mod sync;
pub mod visuals;

pub use components::*;
pub use player::*;
pub use sync::*;
pub use visuals::*;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<PendingInput>()
            .init_resource::<ColliderOutlines>()

            // Events
            .add_event::<RunEvent>()

            // Static scene
            .add_systems(Startup, (setup_camera, spawn_starfield))

            // Run setup/cleanup
            .add_systems(OnEnter(AppState::Playing), setup_run)
            .add_systems(OnExit(AppState::GameOver), cleanup_run)

            // Simulation (fixed timestep, keeps going after game over so the
            // launch plays out)
            .add_systems(FixedUpdate, step_run.run_if(resource_exists::<Run>))

            // Input and mirroring (variable timestep)
            .add_systems(Update, (
                gather_input,
                sync_player_mesh,
                sync_ring_meshes,
                log_run_events,
            ).run_if(resource_exists::<Run>))

            // Decoration
            .add_systems(Update, (
                spin_starfield,
                orbit_camera,
                toggle_collider_outlines,
                draw_collider_outlines.run_if(resource_exists::<Run>),
            ))

            // Game over state
            .add_systems(Update, handle_game_over_input.run_if(in_state(AppState::GameOver)));
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// Loaded game configuration
#[derive(Resource)]
pub struct Settings(pub GameConfig);

/// The live run
#[derive(Resource)]
pub struct Run(pub RunState);

// ============================================================================
// EVENTS
// ============================================================================

/// Simulation event forwarded into the ECS
#[derive(Event)]
pub struct RunEvent(pub GameEvent);

// ============================================================================
// RUN SETUP
// ============================================================================

fn setup_run(
    mut commands: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pending: ResMut<PendingInput>,
) {
    let config = &settings.0;
    let seed = config.seed.unwrap_or_else(rand::random);

    let run = RunState::new(config, seed);
    info!("Setting up run (seed {})...", hex::encode(seed.to_be_bytes()));

    spawn_run_meshes(&mut commands, &run, config, &mut meshes, &mut materials);

    *pending = PendingInput::default();
    commands.insert_resource(Run(run));
}

fn cleanup_run(
    mut commands: Commands,
    entities: Query<Entity, With<RunEntity>>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<Run>();
    info!("Run cleaned up");
}

// ============================================================================
// SIMULATION
// ============================================================================

/// Advance the simulation one tick with the input gathered since the last one
fn step_run(
    mut run: ResMut<Run>,
    settings: Res<Settings>,
    mut pending: ResMut<PendingInput>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut run_events: EventWriter<RunEvent>,
) {
    let input = pending.take();
    let result = tick(&mut run.0, input, &settings.0);

    for event in result.events {
        run_events.send(RunEvent(event));
    }

    if result.phase != RunPhase::Running && *state.get() == AppState::Playing {
        next_state.set(AppState::GameOver);
    }
}

fn log_run_events(mut run_events: EventReader<RunEvent>) {
    for RunEvent(event) in run_events.read() {
        debug!("tick {}: {:?}", event.tick, event.data);
    }
}

// ============================================================================
// GAME OVER
// ============================================================================

fn handle_game_over_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(AppState::Playing);
    }
}
