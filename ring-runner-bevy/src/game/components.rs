//! Scene components
//!
//! Each renderable mirrors one physics body in the simulation. The marker
//! says which body to read the pose from.

use bevy::prelude::*;

// ============================================================================
// BODY MIRRORS
// ============================================================================

/// Mesh following the player body
#[derive(Component)]
pub struct PlayerMesh;

/// Mesh following a ring body
#[derive(Component)]
pub struct RingMesh {
    pub id: u32,
}

/// Ground slab mesh
#[derive(Component)]
pub struct GroundMesh;

/// Anything spawned for one run; despawned on restart
#[derive(Component)]
pub struct RunEntity;

// ============================================================================
// DECORATION
// ============================================================================

/// Spinning background point cloud
#[derive(Component)]
pub struct Starfield {
    /// Spin rate around x, y, z (rad/s)
    pub spin: Vec3,
}

/// Camera orbiting a target point
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Rotation around +Y, 0 = looking down -Z
    pub yaw: f32,
    /// Elevation above the XZ plane
    pub pitch: f32,
}

impl OrbitCamera {
    pub const MIN_RADIUS: f32 = 1.0;
    pub const MAX_RADIUS: f32 = 50.0;
    /// Keeps the camera off the poles
    pub const MAX_PITCH: f32 = 1.5;

    /// Orbit that places the camera at `position`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(Self::MIN_RADIUS);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
        }
    }

    /// Camera position for the current angles.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.radius
    }

    /// Apply a drag (radians) and a zoom factor.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32, zoom: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        self.radius = (self.radius * zoom).clamp(Self::MIN_RADIUS, Self::MAX_RADIUS);
    }

    /// Transform looking at the target.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_reproduces_start_position() {
        let start = Vec3::new(0.0, 1.5, 4.5);
        let orbit = OrbitCamera::from_position(start, Vec3::ZERO);

        assert!(orbit.position().distance(start) < 1e-4);
        assert!(orbit.yaw.abs() < 1e-6);
    }

    #[test]
    fn test_orbit_clamps() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);

        orbit.orbit(0.0, 10.0, 100.0);
        assert_eq!(orbit.pitch, OrbitCamera::MAX_PITCH);
        assert_eq!(orbit.radius, OrbitCamera::MAX_RADIUS);

        orbit.orbit(0.0, -10.0, 0.0);
        assert_eq!(orbit.pitch, -OrbitCamera::MAX_PITCH);
        assert_eq!(orbit.radius, OrbitCamera::MIN_RADIUS);
    }

    #[test]
    fn test_yaw_keeps_distance() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 1.5, 4.5), Vec3::ZERO);
        let radius = orbit.radius;

        orbit.orbit(1.0, 0.0, 1.0);
        assert!((orbit.position().length() - radius).abs() < 1e-4);
    }
}
