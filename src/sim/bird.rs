//! The player's bird
//!
//! The bird never moves horizontally. Vertically it either climbs along an
//! eased (1 - cos) profile for a fixed duration after each flap, or sinks at
//! a constant speed.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::mask::CollisionMask;
use crate::consts::*;
use crate::sprite::Sprite;

/// Which of the two bird sprites (and masks) is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WingPhase {
    Up,
    Down,
}

impl WingPhase {
    /// Phase for a point in the flap cycle
    pub fn at(flap_clock_ms: f32) -> Self {
        if flap_clock_ms.rem_euclid(WING_FLAP_PERIOD_MS) >= WING_FLAP_PERIOD_MS / 2.0 {
            WingPhase::Up
        } else {
            WingPhase::Down
        }
    }
}

/// Collision masks for both wing phases, built once from the bird sprites
#[derive(Debug, Clone)]
pub struct BirdMasks {
    pub wing_up: CollisionMask,
    pub wing_down: CollisionMask,
}

impl BirdMasks {
    pub fn from_sprites(wing_up: &Sprite, wing_down: &Sprite) -> Self {
        Self {
            wing_up: CollisionMask::from_sprite(wing_up),
            wing_down: CollisionMask::from_sprite(wing_down),
        }
    }

    pub fn get(&self, wing: WingPhase) -> &CollisionMask {
        match wing {
            WingPhase::Up => &self.wing_up,
            WingPhase::Down => &self.wing_down,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Top-left corner; x is fixed for the bird's lifetime
    pub pos: Vec2,
    /// Remaining climb time (ms); <= 0 means sinking
    pub msec_to_climb: f32,
    /// Simulated time into the current wing flap cycle (ms)
    flap_clock_ms: f32,
    masks: BirdMasks,
}

impl Bird {
    pub fn new(pos: Vec2, msec_to_climb: f32, masks: BirdMasks) -> Self {
        Self {
            pos,
            msec_to_climb,
            flap_clock_ms: 0.0,
            masks,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn is_climbing(&self) -> bool {
        self.msec_to_climb > 0.0
    }

    /// Start a full climb, cutting short any climb in progress
    pub fn climb(&mut self) {
        self.msec_to_climb = BIRD_CLIMB_DURATION_MS;
    }

    /// Advance vertical motion and the flap animation by `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: f32) {
        if self.msec_to_climb > 0.0 {
            let frac_climb_done = 1.0 - self.msec_to_climb / BIRD_CLIMB_DURATION_MS;
            self.pos.y -= BIRD_CLIMB_SPEED
                * elapsed_ms
                * (1.0 - (frac_climb_done * std::f32::consts::PI).cos());
            self.msec_to_climb -= elapsed_ms;
        } else {
            self.pos.y += BIRD_SINK_SPEED * elapsed_ms;
        }

        self.flap_clock_ms = (self.flap_clock_ms + elapsed_ms) % WING_FLAP_PERIOD_MS;
    }

    pub fn wing(&self) -> WingPhase {
        WingPhase::at(self.flap_clock_ms)
    }

    /// Collision mask for the current wing phase
    pub fn mask(&self) -> &CollisionMask {
        self.masks.get(self.wing())
    }

    /// Integer screen position used for drawing and mask tests
    pub fn origin(&self) -> IVec2 {
        self.pos.as_ivec2()
    }
}
