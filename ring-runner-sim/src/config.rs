//! Game Configuration
//!
//! Every tunable of the run lives here. Defaults reproduce the classic
//! lane: a 30×30 ground slab, ten powerups, ten enemies, rings scrolling
//! 0.1 units per tick toward a camera plane at z = 4.5.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Physics world settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity vector (m/s²)
    pub gravity: [f32; 3],
    /// Simulation ticks per second; one physics step per tick
    pub tick_rate: f32,
    /// Half extents of the ground slab
    pub ground_half_extents: [f32; 3],
    /// Height of the ground slab centre
    pub ground_y: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            tick_rate: 60.0,
            ground_half_extents: [15.0, 0.5, 15.0],
            ground_y: -1.0,
        }
    }
}

impl WorldConfig {
    /// Length of one fixed step in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

/// Player box settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Half edge length of the player cube
    pub half_extent: f32,
    /// Body mass
    pub mass: f32,
    /// Spawn and reset position
    pub spawn: [f32; 3],
    /// Sideways distance moved per tick while a nudge key is held
    pub nudge_step: f32,
    /// Height the player is placed at on jump
    pub jump_height: f32,
    /// Launch velocity after game over: (up, toward camera)
    pub launch_speed: [f32; 2],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            half_extent: 0.25,
            mass: 1.0,
            spawn: [0.0, 0.0, 0.0],
            nudge_step: 0.05,
            jump_height: 2.0,
            launch_speed: [5.0, 5.0],
        }
    }
}

/// Ring (obstacle) settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of powerup rings
    pub powerup_count: u32,
    /// Number of enemy rings
    pub enemy_count: u32,
    /// Sensor radius
    pub radius: f32,
    /// Distance travelled toward the camera per tick
    pub speed: f32,
    /// Inclusive integer range for spawn x
    pub spawn_x: [i32; 2],
    /// Inclusive integer range for spawn z
    pub spawn_z: [i32; 2],
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            powerup_count: 10,
            enemy_count: 10,
            radius: 0.2,
            speed: 0.1,
            spawn_x: [-8, 8],
            spawn_z: [-10, -5],
        }
    }
}

/// Background point cloud settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of points
    pub count: u32,
    /// Upper bound of each coordinate
    pub extent: f32,
    /// Spin rate around x, y, z (rad/s)
    pub spin: [f32; 3],
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            extent: 2000.0,
            spin: [0.06, 0.06, 0.3],
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Physics world
    pub world: WorldConfig,
    /// Player box
    pub player: PlayerConfig,
    /// Rings
    pub rings: RingConfig,
    /// Camera plane: rings past it recycle, the launched player is removed
    pub despawn_z: f32,
    /// Background starfield
    pub starfield: StarfieldConfig,
    /// Fixed RNG seed; `None` lets the caller pick one
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Default camera plane.
    pub const DEFAULT_DESPAWN_Z: f32 = 4.5;

    /// Highest tick rate with a usable fixed timestep.
    pub const MAX_TICK_RATE: f32 = 1000.0;

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject configurations that cannot produce a playable run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let tick_rate = self.world.tick_rate;
        if !(tick_rate > 0.0 && tick_rate <= Self::MAX_TICK_RATE) {
            return invalid(format!(
                "tick_rate must be in (0, {}], got {}",
                Self::MAX_TICK_RATE,
                tick_rate
            ));
        }
        if !self.despawn_z.is_finite() {
            return invalid(format!("despawn_z must be finite, got {}", self.despawn_z));
        }
        if self.world.ground_half_extents.iter().any(|e| !(*e > 0.0)) {
            return invalid("ground_half_extents must be positive".into());
        }
        if !(self.player.half_extent > 0.0) || !(self.player.mass > 0.0) {
            return invalid("player half_extent and mass must be positive".into());
        }

        let rings = &self.rings;
        if rings.powerup_count == 0 && rings.enemy_count == 0 {
            return invalid("at least one ring is required".into());
        }
        if !(rings.radius > 0.0 && rings.radius.is_finite()) {
            return invalid(format!("ring radius must be positive, got {}", rings.radius));
        }
        if !(rings.speed > 0.0 && rings.speed.is_finite()) {
            return invalid(format!("ring speed must be positive, got {}", rings.speed));
        }
        if rings.spawn_x[0] > rings.spawn_x[1] {
            return invalid(format!("spawn_x range is inverted: {:?}", rings.spawn_x));
        }
        if rings.spawn_z[0] > rings.spawn_z[1] {
            return invalid(format!("spawn_z range is inverted: {:?}", rings.spawn_z));
        }
        // A ring spawned behind the camera would recycle forever.
        if rings.spawn_z[1] as f32 > self.despawn_z {
            return invalid(format!(
                "spawn_z {:?} reaches past despawn_z {}",
                rings.spawn_z, self.despawn_z
            ));
        }

        Ok(())
    }

    /// Total number of rings.
    pub fn ring_count(&self) -> u32 {
        self.rings.powerup_count + self.rings.enemy_count
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            rings: RingConfig::default(),
            despawn_z: Self::DEFAULT_DESPAWN_Z,
            starfield: StarfieldConfig::default(),
            seed: None,
        }
    }
}
