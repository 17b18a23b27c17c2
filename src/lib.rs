//! Flappy Pipes - a side-scrolling pipe dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, collisions, game state)
//! - `sprite`: RGBA pixel buffers shared by the simulation and the front end
//! - `assets`: Sprite loading (PNG directory or built-in procedural art)
//! - `platform`: Display, input, text and frame pacing collaborators
//! - `game`: The fixed-timestep loop tying simulation and platform together
//! - `settings`: Startup configuration

pub mod assets;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use assets::{AssetError, AssetName, Assets};
pub use game::{Game, RunSummary};
pub use settings::{Settings, SettingsError};
pub use sprite::{Rgba, Sprite};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the loop
    pub const FPS: u32 = 60;
    /// Nominal simulated time per frame (ms)
    pub const FRAME_MS: f32 = 1000.0 / FPS as f32;

    /// Play area dimensions (the background image is 284x512, tiled twice)
    pub const WIN_WIDTH: i32 = 284 * 2;
    pub const WIN_HEIGHT: i32 = 512;

    /// Horizontal scroll speed of the pipes (pixels per ms)
    pub const SCROLL_SPEED: f32 = 0.18;

    /// Bird sprite and collision box size
    pub const BIRD_WIDTH: i32 = 32;
    pub const BIRD_HEIGHT: i32 = 32;
    /// Bird fall speed when not climbing (pixels per ms)
    pub const BIRD_SINK_SPEED: f32 = 0.18;
    /// Average bird climb speed (pixels per ms)
    pub const BIRD_CLIMB_SPEED: f32 = 0.3;
    /// Length of one full climb (ms)
    pub const BIRD_CLIMB_DURATION_MS: f32 = 333.3;
    /// Bird stays at this x for the whole run
    pub const BIRD_START_X: f32 = 50.0;
    /// Bird starts vertically centered
    pub const BIRD_START_Y: f32 = (WIN_HEIGHT / 2 - BIRD_HEIGHT / 2) as f32;
    /// Small initial climb so the bird doesn't sink on frame 0
    pub const BIRD_START_CLIMB_MS: f32 = 2.0;
    /// Full wing flap cycle (ms of simulated time); wings are up in the second half
    pub const WING_FLAP_PERIOD_MS: f32 = 500.0;

    /// Width of a pipe piece (and therefore of a pipe pair)
    pub const PIPE_WIDTH: i32 = 80;
    /// Height of one pipe body slice or end cap
    pub const PIPE_PIECE_HEIGHT: i32 = 32;
    /// Interval between new pipe pairs (ms)
    pub const PIPE_ADD_INTERVAL_MS: u32 = 3000;
}

/// Convert frames to milliseconds at the given frame rate
#[inline]
pub const fn frames_to_msec(frames: f32, fps: u32) -> f32 {
    1000.0 * frames / fps as f32
}

/// Convert milliseconds to frames at the given frame rate
#[inline]
pub const fn msec_to_frames(milliseconds: f32, fps: u32) -> f32 {
    fps as f32 * milliseconds / 1000.0
}
