//! Camera, fog, starfield and collider outlines

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

use ring_runner::game::physics::OutlineShape;
use ring_runner::game::starfield::generate_starfield;
use ring_runner::DeterministicRng;

use super::{OrbitCamera, Run, Settings, Starfield};

const FOG_COLOR: Color = Color::srgb(0.0, 0.278, 0.671);
const FOG_DENSITY: f32 = 0.09;

const OUTLINE_COLOR: Color = Color::srgb(0.682, 0.886, 1.0);

/// Radians of orbit per pixel of mouse drag
const ORBIT_SENSITIVITY: f32 = 0.005;

// ============================================================================
// CAMERA
// ============================================================================

/// Blue haze thickening with the square of distance
pub fn scene_fog() -> DistanceFog {
    DistanceFog {
        color: FOG_COLOR,
        falloff: FogFalloff::ExponentialSquared {
            density: FOG_DENSITY,
        },
        ..default()
    }
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::from_position(Vec3::new(0.0, 1.5, 4.5), Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        scene_fog(),
        orbit.transform(),
        orbit,
        Name::new("Camera"),
    ));
}

/// Left drag orbits, wheel zooms
pub fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y * 0.1,
            MouseScrollUnit::Pixel => w.y * 0.002,
        })
        .sum();

    let drag = if mouse.pressed(MouseButton::Left) { drag } else { Vec2::ZERO };
    if drag == Vec2::ZERO && scroll == 0.0 {
        return;
    }

    for (mut orbit, mut transform) in query.iter_mut() {
        orbit.orbit(
            -drag.x * ORBIT_SENSITIVITY,
            drag.y * ORBIT_SENSITIVITY,
            (1.0 - scroll).max(0.1),
        );
        *transform = orbit.transform();
    }
}

// ============================================================================
// STARFIELD
// ============================================================================

pub fn spawn_starfield(
    mut commands: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = &settings.0.starfield;
    let mut rng = DeterministicRng::new(settings.0.seed.unwrap_or_else(rand::random));

    let positions = generate_starfield(&mut rng, config.count, config.extent);
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals);

    commands.spawn((
        Starfield {
            spin: Vec3::from_array(config.spin),
        },
        Name::new("Starfield"),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));

    info!("Starfield: {} points", config.count);
}

pub fn spin_starfield(
    time: Res<Time>,
    mut query: Query<(&Starfield, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (starfield, mut transform) in query.iter_mut() {
        transform.rotate_x(starfield.spin.x * dt);
        transform.rotate_y(starfield.spin.y * dt);
        transform.rotate_z(starfield.spin.z * dt);
    }
}

// ============================================================================
// COLLIDER OUTLINES
// ============================================================================

/// Draw physics collider outlines over the scene
#[derive(Resource, Default)]
pub struct ColliderOutlines(pub bool);

/// F1 toggles collider outlines
pub fn toggle_collider_outlines(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut outlines: ResMut<ColliderOutlines>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        outlines.0 = !outlines.0;
        info!("Collider outlines {}", if outlines.0 { "on" } else { "off" });
    }
}

pub fn draw_collider_outlines(
    outlines: Res<ColliderOutlines>,
    run: Res<Run>,
    mut gizmos: Gizmos,
) {
    if !outlines.0 {
        return;
    }

    for outline in run.0.physics.collider_outlines() {
        let translation = Vec3::from_array(outline.pose.translation);
        let rotation = Quat::from_array(outline.pose.rotation);

        match outline.shape {
            OutlineShape::Cuboid(half) => {
                let transform = Transform::from_translation(translation)
                    .with_rotation(rotation)
                    .with_scale(Vec3::from_array(half) * 2.0);
                gizmos.cuboid(transform, OUTLINE_COLOR);
            }
            OutlineShape::Ball(radius) => {
                gizmos.sphere(Isometry3d::new(translation, rotation), radius, OUTLINE_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fog_is_exponential_squared() {
        let fog = scene_fog();

        let FogFalloff::ExponentialSquared { density } = fog.falloff else {
            panic!("unexpected falloff {:?}", fog.falloff);
        };
        assert_eq!(density, FOG_DENSITY);

        // Camera to player is about 4.7 units: roughly 16% fogged
        let amount = 1.0 - (-(4.7 * density).powi(2)).exp();
        assert!((amount - 0.164).abs() < 0.01, "fog amount {}", amount);
    }
}
