//! Ring Spawning and Recycling
//!
//! Rings scroll toward the camera by a fixed distance per tick. A ring
//! that crosses the camera plane is sent back to a random spot at the far
//! end of the lane instead of being destroyed.

use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, RingConfig};
use crate::core::rng::DeterministicRng;
use crate::game::physics::PhysicsWorld;
use crate::game::state::RunState;

/// Kind of ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RingKind {
    /// Scores a point and recycles on contact
    Powerup = 0,
    /// Ends the run on contact
    Enemy = 1,
}

impl RingKind {
    /// Display name, also used for mesh naming.
    pub fn label(self) -> &'static str {
        match self {
            RingKind::Powerup => "powerup",
            RingKind::Enemy => "enemy",
        }
    }
}

/// A ring on the lane.
#[derive(Clone, Debug)]
pub struct Ring {
    /// Stable id, unique within a run
    pub id: u32,
    /// Powerup or enemy
    pub kind: RingKind,
    /// Kinematic body
    pub body: RigidBodyHandle,
    /// Sensor collider
    pub collider: ColliderHandle,
    /// Authoritative position; pushed into physics every tick
    pub position: [f32; 3],
}

/// Random spawn point at the far end of the lane.
///
/// x and z are whole numbers drawn from the inclusive config ranges; y is 0.
pub fn spawn_position(rng: &mut DeterministicRng, config: &RingConfig) -> [f32; 3] {
    let x = rng.next_int_range(config.spawn_x[0], config.spawn_x[1]);
    let z = rng.next_int_range(config.spawn_z[0], config.spawn_z[1]);
    [x as f32, 0.0, z as f32]
}

/// Scroll one ring toward the camera.
///
/// Returns `true` if the ring crossed `despawn_z` and was given a fresh
/// spawn position.
pub fn advance(
    position: &mut [f32; 3],
    speed: f32,
    despawn_z: f32,
    rng: &mut DeterministicRng,
    config: &RingConfig,
) -> bool {
    position[2] += speed;

    if position[2] > despawn_z {
        *position = spawn_position(rng, config);
        return true;
    }

    false
}

/// Spawn `powerup_count` powerups, then `enemy_count` enemies.
pub fn spawn_rings(
    physics: &mut PhysicsWorld,
    rng: &mut DeterministicRng,
    config: &RingConfig,
) -> Vec<Ring> {
    let kinds = std::iter::repeat(RingKind::Powerup)
        .take(config.powerup_count as usize)
        .chain(std::iter::repeat(RingKind::Enemy).take(config.enemy_count as usize));

    kinds
        .enumerate()
        .map(|(id, kind)| {
            let position = spawn_position(rng, config);
            let (body, collider) = physics.add_ring(config.radius, position);
            Ring {
                id: id as u32,
                kind,
                body,
                collider,
                position,
            }
        })
        .collect()
}

/// Scroll every ring and push the result into physics.
///
/// Returns the number of rings recycled this tick.
pub fn advance_rings(state: &mut RunState, config: &GameConfig) -> u32 {
    let mut recycled = 0;

    for ring in &mut state.rings {
        let respawned = advance(
            &mut ring.position,
            config.rings.speed,
            config.despawn_z,
            &mut state.rng,
            &config.rings,
        );

        if respawned {
            recycled += 1;
            state.physics.set_translation(ring.body, ring.position);
        } else {
            state.physics.set_next_translation(ring.body, ring.position);
        }
    }

    recycled
}
