//! Physics World
//!
//! Thin wrapper over a rapier3d pipeline. The simulation owns the
//! pipeline, calls `step()` once per tick with a fixed `dt`, and reads
//! contact starts back from a channel.
//!
//! Body layout:
//! - ground: fixed cuboid
//! - player: dynamic cuboid, rotations locked, never sleeps
//! - rings: kinematic position-based bodies with sensor balls

use crossbeam_channel::Receiver;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Rigid body transform as plain arrays, ready to copy into a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position
    pub translation: [f32; 3],
    /// Orientation quaternion as `[x, y, z, w]`
    pub rotation: [f32; 4],
}

impl Pose {
    /// Identity rotation at `translation`.
    pub fn at(translation: [f32; 3]) -> Self {
        Self {
            translation,
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    fn from_isometry(iso: &Isometry<Real>) -> Self {
        let t = iso.translation.vector;
        let q = iso.rotation.quaternion().coords;
        Self {
            translation: [t.x, t.y, t.z],
            rotation: [q.x, q.y, q.z, q.w],
        }
    }
}

/// Collider geometry for debug wireframes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineShape {
    /// Box with half extents
    Cuboid([f32; 3]),
    /// Sphere with radius
    Ball(f32),
}

/// One collider as the debug renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderOutline {
    /// World pose of the collider
    pub pose: Pose,
    /// Geometry
    pub shape: OutlineShape,
    /// Sensors do not push bodies
    pub sensor: bool,
}

/// A contact that began during the last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactStarted {
    /// First collider of the pair
    pub a: ColliderHandle,
    /// Second collider of the pair
    pub b: ColliderHandle,
}

/// Rapier world plus the bookkeeping needed to step it.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: ChannelEventCollector,
    collision_events: Receiver<CollisionEvent>,
    // Held so the collector never sends into a closed channel
    _contact_force_events: Receiver<ContactForceEvent>,
}

impl PhysicsWorld {
    /// Create an empty world stepping `dt` seconds per call.
    pub fn new(gravity: [f32; 3], dt: f32) -> Self {
        let (collision_send, collision_events) = crossbeam_channel::unbounded();
        let (force_send, contact_force_events) = crossbeam_channel::unbounded();

        let integration_parameters = IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        };

        Self {
            gravity: vector![gravity[0], gravity[1], gravity[2]],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: ChannelEventCollector::new(collision_send, force_send),
            collision_events,
            _contact_force_events: contact_force_events,
        }
    }

    /// Fixed step length in seconds.
    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Add the static ground slab.
    pub fn add_ground(&mut self, half_extents: [f32; 3], y: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![0.0, y, 0.0])
            .build();
        let handle = self.bodies.insert(body);

        let collider =
            ColliderBuilder::cuboid(half_extents[0], half_extents[1], half_extents[2]).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    /// Add the player box. Returns its body and collider.
    pub fn add_player(
        &mut self,
        half_extent: f32,
        mass: f32,
        spawn: [f32; 3],
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![spawn[0], spawn[1], spawn[2]])
            .lock_rotations()
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(half_extent, half_extent, half_extent)
            .mass(mass)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        (handle, collider)
    }

    /// Add a ring: kinematic body carrying a sensor ball.
    pub fn add_ring(
        &mut self,
        radius: f32,
        position: [f32; 3],
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position[0], position[1], position[2]])
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(radius)
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        (handle, collider)
    }

    /// Advance the world by exactly one fixed step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );
    }

    /// Contacts that started since the last drain, in report order.
    pub fn drain_contacts(&mut self) -> Vec<ContactStarted> {
        self.collision_events
            .try_iter()
            .filter(|event| event.started())
            .map(|event| ContactStarted {
                a: event.collider1(),
                b: event.collider2(),
            })
            .collect()
    }

    /// Current pose of a body, `None` once removed.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        self.bodies
            .get(handle)
            .map(|body| Pose::from_isometry(body.position()))
    }

    /// Current translation of a body.
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<[f32; 3]> {
        self.pose(handle).map(|pose| pose.translation)
    }

    /// Teleport a body. Kinematic bodies arrive without sweeping.
    pub fn set_translation(&mut self, handle: RigidBodyHandle, position: [f32; 3]) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(vector![position[0], position[1], position[2]], true);
        }
    }

    /// Target for a kinematic body at the end of the next step.
    pub fn set_next_translation(&mut self, handle: RigidBodyHandle, position: [f32; 3]) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position[0], position[1], position[2]]);
        }
    }

    /// Overwrite a body's linear velocity.
    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: [f32; 3]) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(vector![velocity[0], velocity[1], velocity[2]], true);
        }
    }

    /// Linear velocity of a body.
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<[f32; 3]> {
        self.bodies.get(handle).map(|body| {
            let v = body.linvel();
            [v.x, v.y, v.z]
        })
    }

    /// Remove a body and its colliders. Returns false if already gone.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Every cuboid and ball collider with its world pose.
    pub fn collider_outlines(&self) -> Vec<ColliderOutline> {
        self.colliders
            .iter()
            .filter_map(|(_, collider)| {
                let shape = if let Some(cuboid) = collider.shape().as_cuboid() {
                    let h = cuboid.half_extents;
                    OutlineShape::Cuboid([h.x, h.y, h.z])
                } else if let Some(ball) = collider.shape().as_ball() {
                    OutlineShape::Ball(ball.radius)
                } else {
                    return None;
                };

                Some(ColliderOutline {
                    pose: Pose::from_isometry(collider.position()),
                    shape,
                    sensor: collider.is_sensor(),
                })
            })
            .collect()
    }
}
