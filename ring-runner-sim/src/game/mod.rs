//! Game Logic Module
//!
//! ## Module Structure
//!
//! - `physics`: rapier3d world wrapper
//! - `input`: Input frames and recordings
//! - `state`: Run state, player, rings
//! - `rings`: Ring spawning and recycling
//! - `collision`: Contact classification and dispatch
//! - `events`: Game events
//! - `starfield`: Background point cloud
//! - `tick`: Fixed-step simulation loop

pub mod physics;
pub mod input;
pub mod state;
pub mod rings;
pub mod collision;
pub mod events;
pub mod starfield;
pub mod tick;

// Re-export key types
pub use input::{InputFrame, InputRecording};
pub use state::{RunPhase, RunState, PlayerBody};
pub use rings::{Ring, RingKind};
pub use events::{GameEvent, GameEventData};
pub use physics::{ColliderOutline, OutlineShape, Pose};
pub use tick::TickResult;
