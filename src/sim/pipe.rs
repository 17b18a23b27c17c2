//! Pipe pairs: the obstacles
//!
//! A pipe pair is one column of stacked pieces: a top pipe hanging from the
//! ceiling and a bottom pipe standing on the floor, each capped by an end
//! piece, with a single gap between them. The composite image and its
//! collision mask are rendered once at creation; afterwards only `x` changes.

use glam::IVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::mask::CollisionMask;
use crate::consts::*;
use crate::sprite::Sprite;

/// Chooses where the gap goes in each new pipe pair
pub trait GapSource {
    /// Number of bottom body pieces, in `1..=total_body_pieces`
    fn bottom_pieces(&mut self, total_body_pieces: u32) -> u32;
}

/// Uniform gap placement from a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn bottom_pieces(&mut self, total_body_pieces: u32) -> u32 {
        self.rng.random_range(1..=total_body_pieces)
    }
}

/// Play area dimensions plus the derived body-piece budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeLayout {
    pub area_width: i32,
    pub area_height: i32,
    pub bird_height: i32,
    total_body_pieces: u32,
}

/// Body pieces that fit once room for three bird heights and three pieces
/// (two end caps plus one body piece of margin) is reserved
pub const fn total_body_pieces(area_height: i32, bird_height: i32) -> i32 {
    (area_height - 3 * bird_height - 3 * PIPE_PIECE_HEIGHT).div_euclid(PIPE_PIECE_HEIGHT)
}

impl PipeLayout {
    /// The standard play area
    pub const STANDARD: PipeLayout = PipeLayout {
        area_width: WIN_WIDTH,
        area_height: WIN_HEIGHT,
        bird_height: BIRD_HEIGHT,
        total_body_pieces: total_body_pieces(WIN_HEIGHT, BIRD_HEIGHT) as u32,
    };

    /// Custom layout; `None` when not even one body piece fits
    pub fn new(area_width: i32, area_height: i32, bird_height: i32) -> Option<Self> {
        let total = total_body_pieces(area_height, bird_height);
        if area_width <= 0 || total < 1 {
            return None;
        }
        Some(Self {
            area_width,
            area_height,
            bird_height,
            total_body_pieces: total as u32,
        })
    }

    #[inline]
    pub fn total_body_pieces(&self) -> u32 {
        self.total_body_pieces
    }
}

/// Renders new pipe pairs from the pipe sprites
#[derive(Debug, Clone)]
pub struct PipeFactory {
    end: Sprite,
    body: Sprite,
    layout: PipeLayout,
}

impl PipeFactory {
    pub fn new(end: Sprite, body: Sprite, layout: PipeLayout) -> Self {
        Self { end, body, layout }
    }

    /// New pair at the right edge with a gap chosen by `gaps`
    pub fn build(&self, gaps: &mut dyn GapSource) -> PipePair {
        self.build_with_split(gaps.bottom_pieces(self.layout.total_body_pieces))
    }

    /// New pair at the right edge with `bottom_body` bottom body pieces,
    /// clamped to `1..=total_body_pieces`
    pub fn build_with_split(&self, bottom_body: u32) -> PipePair {
        let area_h = self.layout.area_height;
        let total = self.layout.total_body_pieces;
        let bottom_body = bottom_body.clamp(1, total);
        let top_body = total - bottom_body;

        let mut image = Sprite::new(PIPE_WIDTH as u32, area_h as u32);

        // Bottom pipe, stacked up from the floor
        for i in 1..=bottom_body as i32 {
            image.blit(&self.body, IVec2::new(0, area_h - i * PIPE_PIECE_HEIGHT));
        }
        let bottom_end_y = area_h - bottom_body as i32 * PIPE_PIECE_HEIGHT;
        image.blit(&self.end, IVec2::new(0, bottom_end_y - PIPE_PIECE_HEIGHT));

        // Top pipe, hanging from the ceiling
        for i in 0..top_body as i32 {
            image.blit(&self.body, IVec2::new(0, i * PIPE_PIECE_HEIGHT));
        }
        image.blit(&self.end, IVec2::new(0, top_body as i32 * PIPE_PIECE_HEIGHT));

        let mask = CollisionMask::from_sprite(&image);

        PipePair {
            x: (self.layout.area_width - 1) as f32,
            area_width: self.layout.area_width,
            area_height: area_h,
            // Counts include the end caps from here on
            top_pieces: top_body + 1,
            bottom_pieces: bottom_body + 1,
            score_counted: false,
            image,
            mask,
        }
    }
}

/// One obstacle: a top and bottom pipe with a gap between
#[derive(Debug, Clone)]
pub struct PipePair {
    /// Left edge
    pub x: f32,
    area_width: i32,
    area_height: i32,
    top_pieces: u32,
    bottom_pieces: u32,
    /// Set once the bird has passed this pair
    pub score_counted: bool,
    image: Sprite,
    mask: CollisionMask,
}

impl PipePair {
    /// Pieces in the top pipe, end cap included
    pub fn top_pieces(&self) -> u32 {
        self.top_pieces
    }

    /// Pieces in the bottom pipe, end cap included
    pub fn bottom_pieces(&self) -> u32 {
        self.bottom_pieces
    }

    pub fn top_height_px(&self) -> i32 {
        self.top_pieces as i32 * PIPE_PIECE_HEIGHT
    }

    pub fn bottom_height_px(&self) -> i32 {
        self.bottom_pieces as i32 * PIPE_PIECE_HEIGHT
    }

    /// Height of the opening between the pipes
    pub fn gap_px(&self) -> i32 {
        self.area_height - self.top_height_px() - self.bottom_height_px()
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH as f32
    }

    /// Whether any column of the pair lies inside the play area
    pub fn visible(&self) -> bool {
        -(PIPE_WIDTH as f32) < self.x && self.x < self.area_width as f32
    }

    pub fn update(&mut self, elapsed_ms: f32) {
        self.x -= SCROLL_SPEED * elapsed_ms;
    }

    pub fn image(&self) -> &Sprite {
        &self.image
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x as i32, 0)
    }

    /// Pixel-accurate overlap test against another mask at `pos`
    pub fn collides_with(&self, mask: &CollisionMask, pos: IVec2) -> bool {
        self.mask.overlaps(self.origin(), mask, pos)
    }
}
