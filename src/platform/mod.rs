//! Platform abstraction layer
//!
//! The game loop talks to the outside world only through these traits:
//! - [`Display`]: composites sprites and presents frames
//! - [`InputSource`]: discrete per-tick input events
//! - [`TextRenderer`]: rasterizes the score
//! - [`FramePacer`]: caps the loop at the target frame rate
//!
//! `terminal` provides the crossterm front end, `headless` the test doubles.

pub mod font;
pub mod headless;
pub mod pacer;
pub mod terminal;

use anyhow::Result;
use glam::IVec2;

use crate::sim::InputEvent;
use crate::sprite::{Rgba, Sprite};

pub use font::BitmapFont;
pub use headless::{FixedPacer, RecordingDisplay, ScriptedInput};
pub use pacer::SleepPacer;
pub use terminal::{TerminalDisplay, TerminalInput};

/// Somewhere frames are drawn
pub trait Display {
    /// Composite `sprite` with its top-left corner at `pos` (play-area pixels)
    fn blit(&mut self, sprite: &Sprite, pos: IVec2);
    /// Commit the composited frame
    fn present(&mut self) -> Result<()>;
}

/// Source of player input
pub trait InputSource {
    /// Append every event that arrived since the last call
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()>;
}

/// Text rasterizer
pub trait TextRenderer {
    /// Sprite sized to fit `text`, drawn in `color` on transparent
    fn render(&mut self, text: &str, color: Rgba) -> Sprite;
}

/// Frame rate limiter
pub trait FramePacer {
    /// Block until a frame at `fps` has elapsed since the previous call;
    /// returns the real milliseconds since the previous call
    fn tick(&mut self, fps: u32) -> f32;
}
