//! Pixel-accurate collision masks
//!
//! A mask is a 1-bit occupancy bitmap derived from a sprite's alpha channel.
//! Rows are stored as 64-bit words so two masks can be tested for overlap by
//! AND-ing words across the rectangle where they intersect.

use glam::IVec2;

use crate::sprite::Sprite;

/// Pixels with alpha above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// 1-bit occupancy bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    /// Words per row
    stride: usize,
    words: Vec<u64>,
}

impl CollisionMask {
    /// Empty mask
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            stride,
            words: vec![0; stride * height as usize],
        }
    }

    /// Solid wherever the sprite's alpha exceeds [`ALPHA_THRESHOLD`]
    pub fn from_sprite(sprite: &Sprite) -> Self {
        let mut mask = Self::new(sprite.width(), sprite.height());
        for (i, px) in sprite.pixels().iter().enumerate() {
            if px.a > ALPHA_THRESHOLD {
                let x = (i % sprite.width() as usize) as u32;
                let y = (i / sprite.width() as usize) as u32;
                mask.set(x, y);
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.stride + x as usize / 64;
            self.words[idx] |= 1 << (x % 64);
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.stride + x as usize / 64;
        self.words[idx] & (1 << (x % 64)) != 0
    }

    /// Number of solid pixels
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// 64 bits of row `y` starting at column `x`; bits past the row end are zero
    #[inline]
    fn word_at(&self, y: u32, x: u32) -> u64 {
        let row = y as usize * self.stride;
        let w = x as usize / 64;
        let shift = x % 64;
        let lo = self.words[row + w] >> shift;
        let hi = if shift > 0 && w + 1 < self.stride {
            self.words[row + w + 1] << (64 - shift)
        } else {
            0
        };
        lo | hi
    }

    /// Whether the two masks share a solid pixel when `self` sits at
    /// `self_pos` and `other` at `other_pos`
    pub fn overlaps(&self, self_pos: IVec2, other: &CollisionMask, other_pos: IVec2) -> bool {
        let left = self_pos.x.max(other_pos.x);
        let top = self_pos.y.max(other_pos.y);
        let right = (self_pos.x + self.width as i32).min(other_pos.x + other.width as i32);
        let bottom = (self_pos.y + self.height as i32).min(other_pos.y + other.height as i32);
        if left >= right || top >= bottom {
            return false;
        }

        for y in top..bottom {
            let ay = (y - self_pos.y) as u32;
            let by = (y - other_pos.y) as u32;
            let mut x = left;
            while x < right {
                let len = (right - x).min(64) as u32;
                let keep = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
                let a = self.word_at(ay, (x - self_pos.x) as u32);
                let b = other.word_at(by, (x - other_pos.x) as u32);
                if a & b & keep != 0 {
                    return true;
                }
                x += 64;
            }
        }
        false
    }
}
