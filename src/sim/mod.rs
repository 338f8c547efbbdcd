//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod random;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hit_with_inset};
pub use random::random_int;
pub use state::{
    Background, Character, GameEvent, GamePhase, GameState, Obstacle, RunState, Viewport,
};
pub use tick::{TickInput, tick};
