//! Game state and core simulation types
//!
//! Everything that changes during a run lives in [`GameState`], owned by the
//! game loop and mutated only through [`tick`](super::tick::tick).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bird::{Bird, BirdMasks};
use super::pipe::{GapSource, PipeFactory, PipeLayout, SeededGaps};
use super::stream::PipeStream;
use crate::assets::Assets;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen until pause is toggled again
    Paused,
    /// Run ended (terminal)
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Player asked to quit
    Quit,
    /// Bird hit a pipe
    PipeCollision,
    /// Bird reached the top of the play area
    Ceiling,
    /// Bird reached the bottom of the play area
    Floor,
}

/// Complete game state
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Pipes passed
    pub score: u64,
    /// Frames simulated (not counting paused ticks)
    pub frame_clock: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Set when the phase becomes `Over`
    pub over_cause: Option<GameOverCause>,
    pub bird: Bird,
    pub pipes: PipeStream,
    layout: PipeLayout,
    gaps: Box<dyn GapSource>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, assets: &Assets) -> Self {
        Self::with_gap_source(seed, assets, Box::new(SeededGaps::new(seed)))
    }

    /// Create a game state with a caller-supplied gap placement source
    pub fn with_gap_source(seed: u64, assets: &Assets, gaps: Box<dyn GapSource>) -> Self {
        let layout = PipeLayout::STANDARD;
        let masks = BirdMasks::from_sprites(&assets.bird_wing_up, &assets.bird_wing_down);
        let factory = PipeFactory::new(assets.pipe_end.clone(), assets.pipe_body.clone(), layout);

        Self {
            seed,
            score: 0,
            frame_clock: 0,
            phase: GamePhase::Running,
            over_cause: None,
            bird: Bird::new(
                Vec2::new(BIRD_START_X, BIRD_START_Y),
                BIRD_START_CLIMB_MS,
                masks,
            ),
            pipes: PipeStream::new(factory),
            layout,
            gaps,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Spawn a pipe pair if the current frame is on the spawn interval
    pub fn try_spawn(&mut self) -> bool {
        self.pipes.try_spawn(self.frame_clock, self.gaps.as_mut())
    }

    /// Flip between running and paused; no effect once over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Over => GamePhase::Over,
        };
        log::info!("Game {:?} at frame {}", self.phase, self.frame_clock);
    }

    /// Enter the terminal phase
    pub fn end(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::Over {
            return;
        }
        self.phase = GamePhase::Over;
        self.over_cause = Some(cause);
        log::info!(
            "Game over ({:?}) at frame {} with score {}",
            cause,
            self.frame_clock,
            self.score
        );
    }

    /// First reason the bird is dead in its current position, if any
    pub fn check_collision(&self) -> Option<GameOverCause> {
        let mask = self.bird.mask();
        let origin = self.bird.origin();
        if self.pipes.visible().any(|p| p.collides_with(mask, origin)) {
            return Some(GameOverCause::PipeCollision);
        }

        let y = self.bird.y();
        if y <= 0.0 {
            Some(GameOverCause::Ceiling)
        } else if y >= (self.layout.area_height - BIRD_HEIGHT) as f32 {
            Some(GameOverCause::Floor)
        } else {
            None
        }
    }
}
