//! Hop Dash - a side-scrolling jump-the-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Run controller (frame scheduling decision, restart)
//! - `assets`: Sprite loading gate
//! - `renderer`: 2D render pass and the Canvas backend
//! - `input`: Jump intent shared between event handlers and the loop
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameOutcome, Game};
pub use settings::Settings;
pub use tuning::{Tuning, TuningPreset};
