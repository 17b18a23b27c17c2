//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded (or injected) gap placement only
//! - Animation driven by simulated time, never the wall clock
//! - No rendering or platform dependencies

pub mod bird;
pub mod mask;
pub mod pipe;
pub mod state;
pub mod stream;
pub mod tick;

pub use bird::{Bird, BirdMasks, WingPhase};
pub use mask::CollisionMask;
pub use pipe::{GapSource, PipeFactory, PipeLayout, PipePair, SeededGaps, total_body_pieces};
pub use state::{GameOverCause, GamePhase, GameState};
pub use stream::{PipeStream, SPAWN_INTERVAL_FRAMES};
pub use tick::{InputEvent, tick};
