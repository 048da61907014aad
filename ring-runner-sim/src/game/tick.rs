//! Simulation Tick
//!
//! One call advances the run by exactly one fixed physics step.

use tracing::info;

use crate::config::GameConfig;
use crate::game::collision::dispatch;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::rings::advance_rings;
use crate::game::state::{RunPhase, RunState};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Phase after the tick
    pub phase: RunPhase,
    /// Score after the tick
    pub score: u32,
    /// Rings recycled past the camera this tick
    pub recycled: u32,
}

/// Run one simulation tick.
///
/// Order:
/// 1. `Ended` runs do nothing
/// 2. advance tick counter
/// 3. apply player input
/// 4. phase work: scroll rings, or clear rings and launch the player
/// 5. step physics once
/// 6. dispatch contacts that started during the step
pub fn tick(state: &mut RunState, input: InputFrame, config: &GameConfig) -> TickResult {
    let mut result = TickResult {
        phase: state.phase,
        score: state.score,
        ..TickResult::default()
    };

    if state.phase == RunPhase::Ended {
        result.events = state.take_events();
        return result;
    }

    state.tick += 1;

    apply_input(state, input, config);

    match state.phase {
        RunPhase::Running => {
            result.recycled = advance_rings(state, config);
        }
        RunPhase::GameOver => {
            launch_player(state, config);
        }
        RunPhase::Ended => {}
    }

    state.physics.step();

    let contacts = state.physics.drain_contacts();

    #[cfg(feature = "debug-tracing")]
    if !contacts.is_empty() {
        tracing::debug!("Tick {}: {} contacts started", state.tick, contacts.len());
    }

    dispatch(state, &contacts, config);

    result.phase = state.phase;
    result.score = state.score;
    result.events = state.take_events();
    result
}

/// Move the player according to this tick's input.
fn apply_input(state: &mut RunState, input: InputFrame, config: &GameConfig) {
    if input.is_idle() {
        return;
    }

    let Some(player) = state.player else {
        return;
    };

    if let Some(position) = state.physics.translation(player.body) {
        let next = input.apply_to(position, &config.player);
        state.physics.set_translation(player.body, next);
    }
}

/// Game-over handling: clear the lane once, keep the player flying toward
/// the camera, and drop it once it crosses the camera plane.
fn launch_player(state: &mut RunState, config: &GameConfig) {
    if !state.obstacles_cleared {
        let removed = state.clear_obstacles();
        state.push_event(GameEvent::obstacles_cleared(state.tick, removed));
    }

    let Some(player) = state.player else {
        return;
    };

    let Some([x, _, z]) = state.physics.translation(player.body) else {
        return;
    };

    if z > config.despawn_z {
        state.remove_player();
        state.phase = RunPhase::Ended;
        state.push_event(GameEvent::player_left_field(state.tick));
        info!("Player left the field at tick {}", state.tick);
        return;
    }

    // Sideways drift grows with distance from the lane centre
    let [up, toward_camera] = config.player.launch_speed;
    state.physics.set_linvel(player.body, [x, up, toward_camera]);
}

/// Replay a recorded run from scratch.
///
/// Ticks once per recorded frame, stopping early if the run ends.
pub fn replay_run(config: &GameConfig, recording: &InputRecording) -> (RunState, Vec<GameEvent>) {
    let mut state = RunState::new(config, recording.seed);
    let mut all_events = state.take_events();

    for t in 0..recording.len() {
        let result = tick(&mut state, recording.get(t), config);
        all_events.extend(result.events);

        if result.phase == RunPhase::Ended {
            break;
        }
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;
    use crate::game::rings::RingKind;

    fn run(seed: u64) -> (GameConfig, RunState) {
        let config = GameConfig::default();
        let mut state = RunState::new(&config, seed);
        state.take_events();
        (config, state)
    }

    fn first_of(state: &RunState, kind: RingKind) -> usize {
        state.rings.iter().position(|r| r.kind == kind).unwrap()
    }

    #[test]
    fn test_rings_scroll_each_tick() {
        let (config, mut state) = run(5);
        let before: Vec<f32> = state.rings.iter().map(|r| r.position[2]).collect();

        let result = tick(&mut state, InputFrame::new(), &config);

        assert_eq!(state.tick, 1);
        assert_eq!(result.recycled, 0);
        for (ring, z) in state.rings.iter().zip(before) {
            assert!((ring.position[2] - (z + config.rings.speed)).abs() < 1e-5);
            let [_, _, body_z] = state.physics.translation(ring.body).unwrap();
            assert!((body_z - ring.position[2]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rings_recycle_past_camera() {
        let (config, mut state) = run(6);
        state.move_ring_to(0, [8.0, 0.0, config.despawn_z - 0.05]);

        let result = tick(&mut state, InputFrame::new(), &config);

        assert_eq!(result.recycled, 1);
        assert!(state.rings[0].position[2] <= config.rings.spawn_z[1] as f32);
    }

    #[test]
    fn test_powerup_contact_scores() {
        let (config, mut state) = run(7);
        let index = first_of(&state, RingKind::Powerup);
        state.move_ring_to(index, config.player.spawn);

        let mut collected = Vec::new();
        for _ in 0..3 {
            let result = tick(&mut state, InputFrame::new(), &config);
            collected.extend(
                result
                    .events
                    .into_iter()
                    .filter(|e| matches!(e.data, GameEventData::PowerupCollected { .. })),
            );
            if state.score > 0 {
                break;
            }
        }

        assert_eq!(state.score, 1);
        assert_eq!(collected.len(), 1);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.rings[index].position[2] < -4.0);
    }

    #[test]
    fn test_enemy_contact_then_launch_and_removal() {
        let (config, mut state) = run(8);
        let index = first_of(&state, RingKind::Enemy);
        state.move_ring_to(index, config.player.spawn);

        for _ in 0..3 {
            tick(&mut state, InputFrame::new(), &config);
            if state.phase != RunPhase::Running {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::GameOver);

        // Next tick clears the lane and launches the player
        let result = tick(&mut state, InputFrame::new(), &config);
        assert!(state.rings.is_empty());
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::ObstaclesCleared { removed: 20 }));
        let player = state.player.unwrap();
        let [_, vy, vz] = state.physics.linvel(player.body).unwrap();
        assert!(vy > 0.0 && vz > 0.0);

        let mut ended = false;
        for _ in 0..300 {
            let result = tick(&mut state, InputFrame::new(), &config);
            if result.phase == RunPhase::Ended {
                assert!(result
                    .events
                    .iter()
                    .any(|e| e.data == GameEventData::PlayerLeftField));
                ended = true;
                break;
            }
        }

        assert!(ended);
        assert!(state.player.is_none());
        assert_eq!(state.physics.body_count(), 1);
    }

    #[test]
    fn test_ended_run_is_frozen() {
        let (config, mut state) = run(9);
        state.phase = RunPhase::Ended;

        let result = tick(&mut state, InputFrame::new(), &config);

        assert_eq!(state.tick, 0);
        assert_eq!(result.phase, RunPhase::Ended);
    }

    #[test]
    fn test_jump_and_reset_input() {
        let (config, mut state) = run(10);
        let body = state.player.unwrap().body;

        tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_JUMP), &config);
        let [_, y, _] = state.physics.translation(body).unwrap();
        // One step of gravity after being placed at jump height
        assert!(y > config.player.jump_height - 0.05 && y <= config.player.jump_height);

        for _ in 0..5 {
            tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_NUDGE_RIGHT), &config);
        }
        let [x, _, _] = state.physics.translation(body).unwrap();
        assert!((x - 5.0 * config.player.nudge_step).abs() < 1e-3);

        tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_RESET), &config);
        let [x, _, z] = state.physics.translation(body).unwrap();
        assert!(x.abs() < 1e-3 && z.abs() < 1e-3);
    }

    #[test]
    fn test_input_still_applies_after_game_over() {
        let (config, mut state) = run(11);
        state.phase = RunPhase::GameOver;
        let body = state.player.unwrap().body;

        // Reset pulls the player back before the launch velocity is set
        state.physics.set_translation(body, [1.0, 0.0, 0.0]);
        tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_RESET), &config);
        let [x, _, z] = state.physics.translation(body).unwrap();
        assert!(x.abs() < 1e-3, "x = {}", x);
        assert!(z > 0.0 && z < 0.2, "z = {}", z);
        assert_eq!(state.phase, RunPhase::GameOver);

        tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_NUDGE_RIGHT), &config);
        let [x, _, _] = state.physics.translation(body).unwrap();
        assert!(x > config.player.nudge_step * 0.9, "x = {}", x);
    }

    #[test]
    fn test_input_ignored_once_player_is_gone() {
        let (config, mut state) = run(12);
        state.phase = RunPhase::GameOver;
        state.remove_player();

        let result = tick(&mut state, InputFrame::from_flags(InputFrame::FLAG_JUMP), &config);

        assert!(state.player.is_none());
        assert_eq!(result.phase, RunPhase::GameOver);
        assert_eq!(state.physics.body_count(), 1);
    }

    #[test]
    fn test_replay_determinism() {
        let config = GameConfig::default();
        let mut recording = InputRecording::new(4242);
        for t in 0..240u32 {
            let flags = match t % 40 {
                0 => InputFrame::FLAG_JUMP,
                1..=10 => InputFrame::FLAG_NUDGE_LEFT,
                20..=30 => InputFrame::FLAG_NUDGE_RIGHT,
                _ => 0,
            };
            recording.push(InputFrame::from_flags(flags));
        }

        let (final1, events1) = replay_run(&config, &recording);
        let (final2, events2) = replay_run(&config, &recording);

        assert_eq!(final1.compute_hash(), final2.compute_hash());
        assert_eq!(final1.score, final2.score);
        assert_eq!(events1, events2);
        assert!(matches!(events1[0].data, GameEventData::RunStarted { seed: 4242, .. }));
    }
}
