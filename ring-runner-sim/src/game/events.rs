//! Game Events
//!
//! Events generated during simulation for the HUD, logging and replay checks.

use serde::{Deserialize, Serialize};

use crate::game::rings::RingKind;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A run was built
    RunStarted {
        /// RNG seed of the run
        seed: u64,
        /// Total rings on the lane
        rings: u32,
    },

    /// Player touched a powerup
    PowerupCollected {
        /// Ring that was collected and recycled
        ring_id: u32,
        /// Score after collection
        score: u32,
    },

    /// Player touched an enemy; the run is over
    EnemyHit {
        /// Ring that was hit
        ring_id: u32,
    },

    /// Rings were removed after game over
    ObstaclesCleared {
        /// Number of ring bodies removed
        removed: u32,
    },

    /// Launched player passed the camera plane and was removed
    PlayerLeftField,
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create run-started event.
    pub fn run_started(tick: u32, seed: u64, rings: u32) -> Self {
        Self::new(tick, GameEventData::RunStarted { seed, rings })
    }

    /// Create event for a ring contact.
    pub fn ring_contact(tick: u32, kind: RingKind, ring_id: u32, score: u32) -> Self {
        let data = match kind {
            RingKind::Powerup => GameEventData::PowerupCollected { ring_id, score },
            RingKind::Enemy => GameEventData::EnemyHit { ring_id },
        };
        Self::new(tick, data)
    }

    /// Create obstacles-cleared event.
    pub fn obstacles_cleared(tick: u32, removed: u32) -> Self {
        Self::new(tick, GameEventData::ObstaclesCleared { removed })
    }

    /// Create player-left-field event.
    pub fn player_left_field(tick: u32) -> Self {
        Self::new(tick, GameEventData::PlayerLeftField)
    }

    /// True for the event that ends play.
    pub fn is_game_over(&self) -> bool {
        matches!(self.data, GameEventData::EnemyHit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_contact_maps_kind() {
        let powerup = GameEvent::ring_contact(5, RingKind::Powerup, 3, 7);
        assert_eq!(
            powerup.data,
            GameEventData::PowerupCollected { ring_id: 3, score: 7 }
        );
        assert!(!powerup.is_game_over());

        let enemy = GameEvent::ring_contact(6, RingKind::Enemy, 12, 7);
        assert_eq!(enemy.data, GameEventData::EnemyHit { ring_id: 12 });
        assert!(enemy.is_game_over());
        assert_eq!(enemy.tick, 6);
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::obstacles_cleared(40, 20);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"tick":40,"data":{"ObstaclesCleared":{"removed":20}}}"#);
    }
}
