//! Fixed timestep simulation tick
//!
//! Advances the game by one frame in a fixed order: spawn, input, physics,
//! collision, pruning and scoring.

use serde::{Deserialize, Serialize};

use super::state::{GameOverCause, GamePhase, GameState};

/// Discrete input events for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Leave the game
    Quit,
    /// Pause or resume
    TogglePause,
    /// Flap: start a new climb
    Climb,
}

/// Advance the game state by one frame of `dt_ms` simulated milliseconds
///
/// Returns the phase after the tick. `Running` means the frame was fully
/// simulated and should be drawn; `Paused` and `Over` mean nothing moved.
pub fn tick(state: &mut GameState, events: &[InputEvent], dt_ms: f32) -> GamePhase {
    if state.is_over() {
        return GamePhase::Over;
    }

    if state.phase == GamePhase::Running {
        state.try_spawn();
    }

    for event in events {
        match event {
            InputEvent::Quit => {
                state.end(GameOverCause::Quit);
                return GamePhase::Over;
            }
            InputEvent::TogglePause => state.toggle_pause(),
            // Arms the climb even while paused; it is consumed after resume
            InputEvent::Climb => state.bird.climb(),
        }
    }

    if state.phase == GamePhase::Paused {
        return GamePhase::Paused;
    }

    state.pipes.advance(dt_ms);
    state.bird.update(dt_ms);

    if let Some(cause) = state.check_collision() {
        state.end(cause);
        return GamePhase::Over;
    }

    state.pipes.prune_expired();
    let gained = state.pipes.update_scoring(state.bird.x());
    if gained > 0 {
        state.score += gained;
        log::info!("Score: {}", state.score);
    }

    state.frame_clock += 1;
    GamePhase::Running
}
