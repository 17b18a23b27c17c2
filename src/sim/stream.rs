//! The scrolling queue of pipe pairs
//!
//! New pairs are appended at the tail on a fixed frame interval; pairs leave
//! only from the head, once they have scrolled fully off the left edge.

use std::collections::VecDeque;

use super::pipe::{GapSource, PipeFactory, PipePair};
use crate::consts::*;
use crate::msec_to_frames;

/// Frames between spawns at the target frame rate
pub const SPAWN_INTERVAL_FRAMES: u64 = msec_to_frames(PIPE_ADD_INTERVAL_MS as f32, FPS) as u64;

#[derive(Debug, Clone)]
pub struct PipeStream {
    pipes: VecDeque<PipePair>,
    factory: PipeFactory,
    spawn_interval_frames: u64,
}

impl PipeStream {
    pub fn new(factory: PipeFactory) -> Self {
        Self {
            pipes: VecDeque::new(),
            factory,
            spawn_interval_frames: SPAWN_INTERVAL_FRAMES,
        }
    }

    pub fn factory(&self) -> &PipeFactory {
        &self.factory
    }

    /// Spawn a new pair if `frame` falls on the spawn interval
    pub fn try_spawn(&mut self, frame: u64, gaps: &mut dyn GapSource) -> bool {
        if frame % self.spawn_interval_frames != 0 {
            return false;
        }
        let pipe = self.factory.build(gaps);
        log::debug!(
            "Frame {}: spawned pipe pair (top {} / bottom {} pieces)",
            frame,
            pipe.top_pieces(),
            pipe.bottom_pieces()
        );
        self.pipes.push_back(pipe);
        true
    }

    /// Append a pre-built pair at the tail
    pub fn push(&mut self, pipe: PipePair) {
        self.pipes.push_back(pipe);
    }

    /// Scroll every pair left
    pub fn advance(&mut self, elapsed_ms: f32) {
        for pipe in &mut self.pipes {
            pipe.update(elapsed_ms);
        }
    }

    /// Drop pairs from the head while they are off screen; returns how many
    pub fn prune_expired(&mut self) -> usize {
        let mut removed = 0;
        while self.pipes.front().is_some_and(|p| !p.visible()) {
            self.pipes.pop_front();
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Pruned {} pipe pair(s), {} left", removed, self.pipes.len());
        }
        removed
    }

    /// Mark pairs the bird has fully passed; returns points gained
    pub fn update_scoring(&mut self, bird_x: f32) -> u64 {
        let mut gained = 0;
        for pipe in &mut self.pipes {
            if pipe.right() < bird_x && !pipe.score_counted {
                pipe.score_counted = true;
                gained += 1;
            }
        }
        gained
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pipes.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &PipePair> {
        self.pipes.iter().filter(|p| p.visible())
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn front(&self) -> Option<&PipePair> {
        self.pipes.front()
    }
}
