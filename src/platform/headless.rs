//! Headless collaborators for driving the game loop without a terminal

use std::collections::VecDeque;

use anyhow::Result;
use glam::IVec2;

use super::{Display, FramePacer, InputSource};
use crate::sim::InputEvent;
use crate::sprite::Sprite;

/// One recorded `blit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blit {
    pub pos: IVec2,
    pub size: IVec2,
}

/// Records draw calls instead of showing them
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    /// Blits since the last `present`
    pub pending: Vec<Blit>,
    /// Blits of the most recently presented frame
    pub last_frame: Vec<Blit>,
    pub frames_presented: u64,
}

impl Display for RecordingDisplay {
    fn blit(&mut self, sprite: &Sprite, pos: IVec2) {
        self.pending.push(Blit {
            pos,
            size: sprite.size(),
        });
    }

    fn present(&mut self) -> Result<()> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}

/// Replays a fixed list of per-tick event batches, then goes quiet
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Ticks left in the script
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        if let Some(batch) = self.script.pop_front() {
            events.extend(batch);
        }
        Ok(())
    }
}

/// Reports a constant frame time without sleeping
#[derive(Debug, Clone, Copy)]
pub struct FixedPacer {
    pub frame_ms: f32,
}

impl FramePacer for FixedPacer {
    fn tick(&mut self, _fps: u32) -> f32 {
        self.frame_ms
    }
}
