//! Ring Runner headless runner
//!
//! Plays one run with a simple autopilot, then replays the recorded
//! inputs and checks the final state hash matches.
//!
//! Usage: `ring-runner-sim [config.json] [recording-out.json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ring_runner::{
    game::events::GameEventData, replay_run, tick, GameConfig, InputFrame, InputRecording,
    RingKind, RunnerError, RunPhase, RunState, VERSION,
};

/// Stop the demo after one minute of simulated time.
const MAX_TICKS: u32 = 3600;

/// Ticks between autopilot jumps.
const JUMP_EVERY: u32 = 90;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Ring Runner Sim v{}", VERSION);

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => GameConfig::default(),
    };
    let record_to = args.next().map(PathBuf::from);

    let seed = config.seed.unwrap_or(12345);
    info!("Tick Rate: {} Hz, seed {}", config.world.tick_rate, seed);

    let (live, recording) = play(&config, seed);

    if let Some(path) = record_to {
        let json = serde_json::to_string(&recording).map_err(RunnerError::from)?;
        std::fs::write(&path, json).map_err(|source| RunnerError::Recording {
            path: path.clone(),
            source,
        })?;
        info!("Recording written to {}", path.display());
    }

    verify(&config, &live, &recording)?;
    Ok(())
}

/// Autopilot: steer toward the nearest incoming powerup, hop now and then.
fn autopilot(state: &RunState, config: &GameConfig) -> InputFrame {
    let mut input = InputFrame::new();

    if state.tick % JUMP_EVERY == JUMP_EVERY - 1 {
        input.set(InputFrame::FLAG_JUMP, true);
    }

    let Some(player) = state.player_pose() else {
        return input;
    };
    let [px, _, pz] = player.translation;

    let target = state
        .rings
        .iter()
        .filter(|r| r.kind == RingKind::Powerup && r.position[2] < pz)
        .max_by(|a, b| a.position[2].total_cmp(&b.position[2]));

    if let Some(ring) = target {
        let dx = ring.position[0] - px;
        if dx.abs() > config.player.nudge_step {
            let flag = if dx < 0.0 {
                InputFrame::FLAG_NUDGE_LEFT
            } else {
                InputFrame::FLAG_NUDGE_RIGHT
            };
            input.set(flag, true);
        }
    }

    input
}

/// Play one run, recording every input frame.
fn play(config: &GameConfig, seed: u64) -> (RunState, InputRecording) {
    info!("=== Starting Run ===");

    let mut state = RunState::new(config, seed);
    state.take_events();
    let mut recording = InputRecording::new(seed);
    let mut last_report_tick = 0;

    for t in 0..MAX_TICKS {
        let input = autopilot(&state, config);
        recording.push(input);

        let result = tick(&mut state, input, config);

        for event in &result.events {
            match &event.data {
                GameEventData::EnemyHit { ring_id } => {
                    info!("Tick {}: hit enemy ring {}", event.tick, ring_id);
                }
                GameEventData::ObstaclesCleared { removed } => {
                    info!("Tick {}: cleared {} rings", event.tick, removed);
                }
                _ => {}
            }
        }

        // Report every 10 seconds
        if t - last_report_tick >= 600 {
            info!("Tick {}: score {}", t, state.score);
            last_report_tick = t;
        }

        if result.phase == RunPhase::Ended {
            break;
        }
    }

    info!("=== Run Results ===");
    info!("Ticks: {}, score: {}, phase: {:?}", state.tick, state.score, state.phase);

    (state, recording)
}

/// Replay the recording and compare final state hashes.
fn verify(config: &GameConfig, live: &RunState, recording: &InputRecording) -> Result<(), RunnerError> {
    info!("=== Verifying Replay ===");

    let live_hash = hex::encode(live.compute_hash());
    let (replayed, _) = replay_run(config, recording);
    let replay_hash = hex::encode(replayed.compute_hash());

    info!("Live State Hash:   {}", live_hash);
    info!("Replay State Hash: {}", replay_hash);

    if live_hash != replay_hash {
        return Err(RunnerError::ReplayDiverged {
            live: live_hash,
            replay: replay_hash,
        });
    }

    info!("REPLAY VERIFIED: Hashes match!");
    Ok(())
}
