//! Run State
//!
//! Everything one run owns: the physics world, the player body, the rings,
//! the score and the phase.

use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::DeterministicRng;
use crate::game::events::GameEvent;
use crate::game::physics::{PhysicsWorld, Pose};
use crate::game::rings::{spawn_rings, Ring, RingKind};

/// Phase of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Rings scroll, contacts score or kill
    #[default]
    Running,
    /// Enemy was hit; rings are gone and the player is being launched
    GameOver,
    /// Player left the field; nothing moves any more
    Ended,
}

impl RunPhase {
    /// True once an enemy has been hit.
    pub fn is_over(self) -> bool {
        self != RunPhase::Running
    }
}

/// Handles of the player body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerBody {
    /// Dynamic body
    pub body: RigidBodyHandle,
    /// Box collider
    pub collider: ColliderHandle,
}

/// Complete state of one run.
pub struct RunState {
    /// Ticks simulated so far
    pub tick: u32,
    /// Powerups collected
    pub score: u32,
    /// Current phase
    pub phase: RunPhase,
    /// Seed the run was built from
    pub seed: u64,
    /// Ring placement randomness
    pub rng: DeterministicRng,
    /// Physics world
    pub physics: PhysicsWorld,
    /// Static ground body
    pub ground: RigidBodyHandle,
    /// Player, `None` once removed
    pub player: Option<PlayerBody>,
    /// Rings still in the world
    pub rings: Vec<Ring>,
    /// Set once the rings were removed after game over
    pub obstacles_cleared: bool,
    events: Vec<GameEvent>,
}

impl RunState {
    /// Build a run: ground, player, then powerups and enemies.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut physics = PhysicsWorld::new(config.world.gravity, config.world.dt());
        let mut rng = DeterministicRng::new(seed);

        let ground = physics.add_ground(config.world.ground_half_extents, config.world.ground_y);

        let player = &config.player;
        let (body, collider) = physics.add_player(player.half_extent, player.mass, player.spawn);

        let rings = spawn_rings(&mut physics, &mut rng, &config.rings);

        info!(
            "Run built: seed {}, {} powerups, {} enemies",
            seed, config.rings.powerup_count, config.rings.enemy_count
        );

        Self {
            tick: 0,
            score: 0,
            phase: RunPhase::Running,
            seed,
            rng,
            physics,
            ground,
            player: Some(PlayerBody { body, collider }),
            rings,
            obstacles_cleared: false,
            events: vec![GameEvent::run_started(0, seed, config.ring_count())],
        }
    }

    /// Throw this run away and build a fresh one.
    pub fn restart(&mut self, config: &GameConfig, seed: u64) {
        *self = Self::new(config, seed);
    }

    /// Current player pose, `None` once removed.
    pub fn player_pose(&self) -> Option<Pose> {
        self.player.and_then(|p| self.physics.pose(p.body))
    }

    /// Ground pose.
    pub fn ground_pose(&self) -> Option<Pose> {
        self.physics.pose(self.ground)
    }

    /// Poses of all rings still in the world, with id and kind.
    pub fn ring_poses(&self) -> Vec<(u32, RingKind, Pose)> {
        self.rings
            .iter()
            .filter_map(|ring| {
                self.physics
                    .pose(ring.body)
                    .map(|pose| (ring.id, ring.kind, pose))
            })
            .collect()
    }

    /// Index of a ring by collider.
    pub fn ring_index_by_collider(&self, collider: ColliderHandle) -> Option<usize> {
        self.rings.iter().position(|ring| ring.collider == collider)
    }

    /// Teleport a ring.
    pub fn move_ring_to(&mut self, index: usize, position: [f32; 3]) {
        if let Some(ring) = self.rings.get_mut(index) {
            ring.position = position;
            self.physics.set_translation(ring.body, position);
        }
    }

    /// Remove every ring body. Returns how many were removed.
    pub fn clear_obstacles(&mut self) -> u32 {
        let mut removed = 0;
        for ring in self.rings.drain(..) {
            if self.physics.remove_body(ring.body) {
                removed += 1;
            }
        }
        self.obstacles_cleared = true;
        removed
    }

    /// Remove the player body.
    pub fn remove_player(&mut self) -> bool {
        match self.player.take() {
            Some(player) => self.physics.remove_body(player.body),
            None => false,
        }
    }

    /// Queue an event for the current tick's result.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hash the observable state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.seed, |hasher| {
            hasher.update_u32(self.score);
            hasher.update_u8(self.phase as u8);
            hasher.update_bool(self.obstacles_cleared);

            let rng_state = self.rng.state();
            hasher.update_u64(rng_state[0]);
            hasher.update_u64(rng_state[1]);

            match self.player_pose() {
                Some(pose) => {
                    hasher.update_bool(true);
                    hasher.update_vec3(pose.translation);
                }
                None => hasher.update_bool(false),
            }

            hasher.update_u32(self.rings.len() as u32);
            for ring in &self.rings {
                hasher.update_u32(ring.id);
                hasher.update_u8(ring.kind as u8);
                hasher.update_vec3(ring.position);
            }
        })
    }
}
