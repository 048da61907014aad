//! # Ring Runner Simulation
//!
//! Headless game simulation for Ring Runner: a box on a lane collects
//! powerup rings and dies on enemy rings.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    RING RUNNER SIM                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── rng.rs       - Seeded Xorshift128+ PRNG                 │
//! │  └── hash.rs      - State hashing for replay checks          │
//! │                                                              │
//! │  game/            - Game logic                               │
//! │  ├── physics.rs   - rapier3d world wrapper                   │
//! │  ├── input.rs     - Input frames and recordings              │
//! │  ├── state.rs     - Run state (player, rings, score)         │
//! │  ├── rings.rs     - Ring spawning and recycling              │
//! │  ├── collision.rs - Contact classification and dispatch      │
//! │  ├── events.rs    - Game events                              │
//! │  ├── starfield.rs - Background point cloud                   │
//! │  └── tick.rs      - Fixed-step simulation loop               │
//! │                                                              │
//! │  config.rs        - Tunables, JSON loading, validation       │
//! │  error.rs         - Error types                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! All randomness comes from [`DeterministicRng`] and the physics world
//! advances in fixed steps, so a recorded input stream replays to the
//! same state hash on the same build.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod game;

// Re-export commonly used types
pub use config::GameConfig;
pub use core::rng::DeterministicRng;
pub use error::{ConfigError, RunnerError};
pub use game::input::{InputFrame, InputRecording};
pub use game::physics::{Pose, PhysicsWorld};
pub use game::rings::RingKind;
pub use game::state::{RunPhase, RunState};
pub use game::tick::{tick, replay_run, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
