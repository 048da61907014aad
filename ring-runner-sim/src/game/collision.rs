//! Contact Dispatch
//!
//! Maps physics contact starts onto game rules:
//! - player vs powerup: +1 score, powerup goes back to the far end
//! - player vs enemy: game over
//!
//! Any other pair (player vs ground, ring vs ground) is ignored.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::physics::ContactStarted;
use crate::game::rings::{spawn_position, RingKind};
use crate::game::state::{RunPhase, RunState};

/// A contact between the player and a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingContact {
    /// Index into `RunState::rings`
    pub ring_index: usize,
    /// Kind of the touched ring
    pub kind: RingKind,
}

/// Classify a contact pair. Argument order does not matter.
pub fn classify(state: &RunState, contact: ContactStarted) -> Option<RingContact> {
    let player = state.player?;

    let other = if contact.a == player.collider {
        contact.b
    } else if contact.b == player.collider {
        contact.a
    } else {
        return None;
    };

    let ring_index = state.ring_index_by_collider(other)?;
    Some(RingContact {
        ring_index,
        kind: state.rings[ring_index].kind,
    })
}

/// Apply every contact of a tick in report order.
///
/// Does nothing unless the run is still `Running`. A powerup and an enemy
/// touched in the same tick both count: the point is scored and the run
/// ends.
pub fn dispatch(state: &mut RunState, contacts: &[ContactStarted], config: &GameConfig) {
    if state.phase != RunPhase::Running {
        return;
    }

    for contact in contacts {
        let Some(hit) = classify(state, *contact) else {
            continue;
        };

        let ring_id = state.rings[hit.ring_index].id;

        match hit.kind {
            RingKind::Powerup => {
                let position = spawn_position(&mut state.rng, &config.rings);
                state.move_ring_to(hit.ring_index, position);
                state.score = state.score.saturating_add(1);
                debug!("Powerup {} collected, score {}", ring_id, state.score);
            }
            RingKind::Enemy => {
                state.phase = RunPhase::GameOver;
                info!("Enemy {} hit at tick {}, final score {}", ring_id, state.tick, state.score);
            }
        }

        let event = GameEvent::ring_contact(state.tick, hit.kind, ring_id, state.score);
        state.push_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;

    fn setup() -> (GameConfig, RunState) {
        let config = GameConfig::default();
        let mut state = RunState::new(&config, 11);
        state.take_events();
        (config, state)
    }

    fn contact_with(state: &RunState, index: usize, player_first: bool) -> ContactStarted {
        let player = state.player.unwrap().collider;
        let ring = state.rings[index].collider;
        if player_first {
            ContactStarted { a: player, b: ring }
        } else {
            ContactStarted { a: ring, b: player }
        }
    }

    fn first_of(state: &RunState, kind: RingKind) -> usize {
        state.rings.iter().position(|r| r.kind == kind).unwrap()
    }

    #[test]
    fn test_classify_either_order() {
        let (_, state) = setup();
        let enemy = first_of(&state, RingKind::Enemy);

        for player_first in [true, false] {
            let hit = classify(&state, contact_with(&state, enemy, player_first)).unwrap();
            assert_eq!(hit.ring_index, enemy);
            assert_eq!(hit.kind, RingKind::Enemy);
        }
    }

    #[test]
    fn test_classify_ignores_non_player_pairs() {
        let (_, state) = setup();
        let pair = ContactStarted {
            a: state.rings[0].collider,
            b: state.rings[1].collider,
        };
        assert!(classify(&state, pair).is_none());
    }

    #[test]
    fn test_powerup_scores_and_recycles() {
        let (config, mut state) = setup();
        let index = first_of(&state, RingKind::Powerup);
        state.move_ring_to(index, [0.0, 0.0, 0.0]);

        let contact = contact_with(&state, index, true);
        dispatch(&mut state, &[contact], &config);

        assert_eq!(state.score, 1);
        assert_eq!(state.phase, RunPhase::Running);
        let z = state.rings[index].position[2];
        assert!((-10.0..=-5.0).contains(&z));

        let events = state.take_events();
        assert_eq!(
            events[0].data,
            GameEventData::PowerupCollected {
                ring_id: state.rings[index].id,
                score: 1
            }
        );
    }

    #[test]
    fn test_enemy_ends_run() {
        let (config, mut state) = setup();
        let index = first_of(&state, RingKind::Enemy);

        let contact = contact_with(&state, index, false);
        dispatch(&mut state, &[contact], &config);

        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.score, 0);
        assert!(state.take_events()[0].is_game_over());
    }

    #[test]
    fn test_both_kinds_same_tick() {
        let (config, mut state) = setup();
        let enemy = first_of(&state, RingKind::Enemy);
        let powerup = first_of(&state, RingKind::Powerup);
        let contacts = [
            contact_with(&state, enemy, true),
            contact_with(&state, powerup, true),
        ];

        dispatch(&mut state, &contacts, &config);

        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.score, 1);
        assert_eq!(state.take_events().len(), 2);
    }

    #[test]
    fn test_ignored_after_game_over() {
        let (config, mut state) = setup();
        state.phase = RunPhase::GameOver;
        let powerup = first_of(&state, RingKind::Powerup);

        let contact = contact_with(&state, powerup, true);
        dispatch(&mut state, &[contact], &config);

        assert_eq!(state.score, 0);
        assert!(state.take_events().is_empty());
    }
}
