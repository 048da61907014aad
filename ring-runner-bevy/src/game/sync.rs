//! Mirror simulation bodies into scene meshes

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use ring_runner::{GameConfig, Pose, RingKind, RunState};

use super::{GroundMesh, PlayerMesh, RingMesh, Run, RunEntity};

/// Rings are a unit torus shrunk to this scale
const RING_SCALE: f32 = 0.1;

const GROUND_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const PLAYER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Ring color by kind
pub fn ring_color(kind: RingKind) -> Color {
    match kind {
        RingKind::Powerup => Color::srgb_u8(0xff, 0xff, 0x00),
        RingKind::Enemy => Color::srgb_u8(0x00, 0x00, 0xff),
    }
}

/// Transform from a simulation pose
pub fn pose_transform(pose: &Pose) -> Transform {
    Transform::from_translation(Vec3::from_array(pose.translation))
        .with_rotation(Quat::from_array(pose.rotation))
}

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawn a mesh for every body in a fresh run
pub fn spawn_run_meshes(
    commands: &mut Commands,
    run: &RunState,
    config: &GameConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Ground
    if let Some(pose) = run.ground_pose() {
        let [hx, hy, hz] = config.world.ground_half_extents;
        commands.spawn((
            GroundMesh,
            RunEntity,
            Name::new("Ground"),
            Mesh3d(meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: GROUND_COLOR,
                unlit: true,
                ..default()
            })),
            pose_transform(&pose),
        ));
    }

    // Player
    if let Some(pose) = run.player_pose() {
        let side = config.player.half_extent * 2.0;
        commands.spawn((
            PlayerMesh,
            RunEntity,
            Name::new("Player"),
            Mesh3d(meshes.add(Cuboid::new(side, side, side))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: PLAYER_COLOR,
                unlit: true,
                ..default()
            })),
            pose_transform(&pose),
        ));
    }

    // Rings share one mesh and one material per kind
    let torus = meshes.add(
        Torus {
            minor_radius: 0.4,
            major_radius: 1.0,
        }
        .mesh()
        .minor_resolution(16)
        .major_resolution(50)
        .build()
        .rotated_by(Quat::from_rotation_x(FRAC_PI_2)),
    );
    let powerup = materials.add(StandardMaterial {
        base_color: ring_color(RingKind::Powerup),
        unlit: true,
        ..default()
    });
    let enemy = materials.add(StandardMaterial {
        base_color: ring_color(RingKind::Enemy),
        unlit: true,
        ..default()
    });

    for (id, kind, pose) in run.ring_poses() {
        let material = match kind {
            RingKind::Powerup => powerup.clone(),
            RingKind::Enemy => enemy.clone(),
        };

        commands.spawn((
            RingMesh { id },
            RunEntity,
            Name::new(format!("{} ring {}", kind.label(), id)),
            Mesh3d(torus.clone()),
            MeshMaterial3d(material),
            pose_transform(&pose).with_scale(Vec3::splat(RING_SCALE)),
        ));
    }

    debug!("Spawned meshes for {} rings", run.rings.len());
}

// ============================================================================
// POSE SYNC
// ============================================================================

/// Follow the player body; despawn once it leaves the world
pub fn sync_player_mesh(
    mut commands: Commands,
    run: Res<Run>,
    mut query: Query<(Entity, &mut Transform), With<PlayerMesh>>,
) {
    let pose = run.0.player_pose();

    for (entity, mut transform) in query.iter_mut() {
        match &pose {
            Some(pose) => {
                let target = pose_transform(pose);
                transform.translation = target.translation;
                transform.rotation = target.rotation;
            }
            None => {
                commands.entity(entity).despawn_recursive();
                info!("Player left the field");
            }
        }
    }
}

/// Follow ring bodies; despawn meshes whose ring is gone
pub fn sync_ring_meshes(
    mut commands: Commands,
    run: Res<Run>,
    mut query: Query<(Entity, &RingMesh, &mut Transform)>,
) {
    let poses: HashMap<u32, Pose> = run
        .0
        .ring_poses()
        .into_iter()
        .map(|(id, _, pose)| (id, pose))
        .collect();

    for (entity, ring, mut transform) in query.iter_mut() {
        match poses.get(&ring.id) {
            Some(pose) => {
                // Scale stays; the torus is pre-rotated in the mesh itself
                let target = pose_transform(pose);
                transform.translation = target.translation;
                transform.rotation = target.rotation;
            }
            None => {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}
