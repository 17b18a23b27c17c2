//! The game loop
//!
//! One iteration per frame: wait for the pacer, drain input, run one
//! simulation tick, and draw the result. The loop ends as soon as the
//! simulation reaches `Over`; that frame is not drawn.

use anyhow::Result;
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::assets::Assets;
use crate::consts::*;
use crate::platform::{Display, FramePacer, InputSource, TextRenderer};
use crate::sim::{GameOverCause, GamePhase, GameState, InputEvent, WingPhase, tick};
use crate::sprite::Rgba;

/// Color of the score text
pub const SCORE_COLOR: Rgba = Rgba::WHITE;

/// How a finished run went
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub score: u64,
    /// Frames simulated, excluding paused ticks
    pub frames: u64,
    pub cause: Option<GameOverCause>,
}

/// A game session: the simulation plus the sprites it draws with
pub struct Game<'a> {
    state: GameState,
    assets: &'a Assets,
    events: Vec<InputEvent>,
}

impl<'a> Game<'a> {
    pub fn new(state: GameState, assets: &'a Assets) -> Self {
        Self {
            state,
            assets,
            events: Vec::with_capacity(8),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the game is over
    pub fn run(
        &mut self,
        display: &mut impl Display,
        input: &mut impl InputSource,
        text: &mut impl TextRenderer,
        pacer: &mut impl FramePacer,
    ) -> Result<RunSummary> {
        log::info!("Starting run with seed {}", self.state.seed);
        while self.frame(display, input, text, pacer)? != GamePhase::Over {}
        Ok(self.summary())
    }

    /// One loop iteration; returns the phase after it
    pub fn frame(
        &mut self,
        display: &mut impl Display,
        input: &mut impl InputSource,
        text: &mut impl TextRenderer,
        pacer: &mut impl FramePacer,
    ) -> Result<GamePhase> {
        let real_ms = pacer.tick(FPS);
        if real_ms > 2.0 * FRAME_MS {
            log::debug!(
                "Slow frame {}: {:.1}ms (target {:.1}ms)",
                self.state.frame_clock,
                real_ms,
                FRAME_MS
            );
        }

        self.events.clear();
        input.poll(&mut self.events)?;

        let phase = tick(&mut self.state, &self.events, FRAME_MS);
        if phase == GamePhase::Running {
            self.draw(display, text)?;
        }
        Ok(phase)
    }

    /// Background, pipes, bird, score
    fn draw(&self, display: &mut impl Display, text: &mut impl TextRenderer) -> Result<()> {
        for x in [0, WIN_WIDTH / 2] {
            display.blit(&self.assets.background, IVec2::new(x, 0));
        }

        for pipe in self.state.pipes.iter() {
            display.blit(pipe.image(), pipe.origin());
        }

        let bird = match self.state.bird.wing() {
            WingPhase::Up => &self.assets.bird_wing_up,
            WingPhase::Down => &self.assets.bird_wing_down,
        };
        display.blit(bird, self.state.bird.origin());

        let score = text.render(&self.state.score.to_string(), SCORE_COLOR);
        let score_x = WIN_WIDTH / 2 - score.width() as i32 / 2;
        display.blit(&score, IVec2::new(score_x, PIPE_PIECE_HEIGHT));

        display.present()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.state.seed,
            score: self.state.score,
            frames: self.state.frame_clock,
            cause: self.state.over_cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{BitmapFont, FixedPacer, RecordingDisplay, ScriptedInput};
    use crate::sim::GapSource;

    /// Gap centred on the bird's start height
    struct MiddleGaps;

    impl GapSource for MiddleGaps {
        fn bottom_pieces(&mut self, total_body_pieces: u32) -> u32 {
            total_body_pieces / 2
        }
    }

    fn pacer() -> FixedPacer {
        FixedPacer { frame_ms: FRAME_MS }
    }

    #[test]
    fn test_draw_order_per_frame() {
        let assets = Assets::builtin();
        let mut game = Game::new(GameState::new(1, &assets), &assets);
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut font = BitmapFont::default();

        let phase = game
            .frame(&mut display, &mut input, &mut font, &mut pacer())
            .unwrap();
        assert_eq!(phase, GamePhase::Running);
        assert_eq!(display.frames_presented, 1);

        // Two background tiles, one pipe pair, the bird, the score
        let frame = &display.last_frame;
        assert_eq!(frame.len(), 5);
        assert_eq!(frame[0].pos, IVec2::new(0, 0));
        assert_eq!(frame[1].pos, IVec2::new(WIN_WIDTH / 2, 0));
        assert_eq!(frame[2].size, IVec2::new(PIPE_WIDTH, WIN_HEIGHT));
        assert_eq!(frame[3].pos, game.state().bird.origin());
        assert_eq!(frame[4].pos.y, PIPE_PIECE_HEIGHT);
    }

    #[test]
    fn test_paused_frames_are_not_drawn() {
        let assets = Assets::builtin();
        let mut game = Game::new(GameState::new(1, &assets), &assets);
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([
            vec![],
            vec![InputEvent::TogglePause],
            vec![InputEvent::Climb],
            vec![],
            vec![InputEvent::TogglePause],
        ]);
        let mut font = BitmapFont::default();

        let phases: Vec<GamePhase> = (0..5)
            .map(|_| {
                game.frame(&mut display, &mut input, &mut font, &mut pacer())
                    .unwrap()
            })
            .collect();

        assert_eq!(
            phases,
            [
                GamePhase::Running,
                GamePhase::Paused,
                GamePhase::Paused,
                GamePhase::Paused,
                GamePhase::Running,
            ]
        );
        assert_eq!(display.frames_presented, 2);
        assert_eq!(game.state().frame_clock, 2);
    }

    #[test]
    fn test_quit_ends_run_without_drawing() {
        let assets = Assets::builtin();
        let mut game = Game::new(GameState::new(3, &assets), &assets);
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::new([vec![], vec![], vec![InputEvent::Quit]]);
        let mut font = BitmapFont::default();

        let summary = game
            .run(&mut display, &mut input, &mut font, &mut pacer())
            .unwrap();
        assert_eq!(
            summary,
            RunSummary {
                seed: 3,
                score: 0,
                frames: 2,
                cause: Some(GameOverCause::Quit),
            }
        );
        assert_eq!(display.frames_presented, 2);
    }

    #[test]
    fn test_no_input_run_ends_on_floor() {
        let assets = Assets::builtin();
        let mut game = Game::new(GameState::new(42, &assets), &assets);
        let mut display = RecordingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut font = BitmapFont::default();

        let summary = game
            .run(&mut display, &mut input, &mut font, &mut pacer())
            .unwrap();
        assert_eq!(summary.cause, Some(GameOverCause::Floor));
        assert_eq!(summary.score, 0);
        assert_eq!(display.frames_presented, summary.frames);
    }

    #[test]
    fn test_steady_flapping_hovers_through_gaps() {
        let assets = Assets::builtin();
        let state = GameState::with_gap_source(0, &assets, Box::new(MiddleGaps));
        let mut game = Game::new(state, &assets);
        let mut display = RecordingDisplay::default();
        let mut font = BitmapFont::default();

        // A flap restarts the climb at its flat start, so flapping every
        // frame holds the bird level in the middle of every gap
        let mut input = ScriptedInput::new((0..600).map(|_| vec![InputEvent::Climb]));
        let start_y = game.state().bird.y();
        while game.state().score < 2 {
            let phase = game
                .frame(&mut display, &mut input, &mut font, &mut pacer())
                .unwrap();
            assert_eq!(phase, GamePhase::Running);
            assert!(input.remaining() > 0);
        }
        assert_eq!(game.state().bird.y(), start_y);
        assert_eq!(game.summary().cause, None);
    }
}
