//! RGBA pixel buffers
//!
//! Sprites are the only image representation in the crate: assets load into
//! them, pipe pairs render into them, and the terminal display composites
//! them into its frame buffer.

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

/// A straight-alpha RGBA pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear blend toward `other` by `t_256 / 256`
    pub const fn lerp(self, other: Rgba, t_256: u16) -> Rgba {
        let t = t_256 as i32;
        Rgba::new(
            (self.r as i32 + (other.r as i32 - self.r as i32) * t / 256) as u8,
            (self.g as i32 + (other.g as i32 - self.g as i32) * t / 256) as u8,
            (self.b as i32 + (other.b as i32 - self.b as i32) * t / 256) as u8,
            (self.a as i32 + (other.a as i32 - self.a as i32) * t / 256) as u8,
        )
    }

    /// Composite `self` over `dst`
    #[inline]
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            0 => dst,
            255 => self,
            a => {
                let mut out = dst.lerp(self, a as u16 + 1);
                out.a = dst.a.max(a);
                out
            }
        }
    }
}

/// A rectangular RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// Fully transparent sprite
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build from tightly packed RGBA8 bytes (as produced by `image::RgbaImage`)
    ///
    /// Returns `None` if the byte count doesn't match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels: &[Rgba] = bytemuck::cast_slice(bytes);
        Some(Self {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Overwrite a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    /// Alpha-composite `src` onto this sprite with its top-left corner at `pos`
    pub fn blit(&mut self, src: &Sprite, pos: IVec2) {
        let x0 = pos.x.max(0);
        let y0 = pos.y.max(0);
        let x1 = (pos.x + src.width as i32).min(self.width as i32);
        let y1 = (pos.y + src.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            let src_row = (y - pos.y) as usize * src.width as usize;
            let dst_row = y as usize * self.width as usize;
            for x in x0..x1 {
                let s = src.pixels[src_row + (x - pos.x) as usize];
                let d = &mut self.pixels[dst_row + x as usize];
                *d = s.over(*d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_clips_to_bounds() {
        let mut dst = Sprite::new(4, 4);
        let src = Sprite::filled(3, 3, Rgba::WHITE);

        dst.blit(&src, IVec2::new(-2, 2));
        assert_eq!(dst.get(0, 2), Some(Rgba::WHITE));
        assert_eq!(dst.get(0, 3), Some(Rgba::WHITE));
        assert_eq!(dst.get(1, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(dst.get(0, 1), Some(Rgba::TRANSPARENT));

        // Entirely off-surface is a no-op
        dst.blit(&src, IVec2::new(10, 10));
        assert_eq!(dst.pixels().iter().filter(|p| **p == Rgba::WHITE).count(), 2);
    }

    #[test]
    fn test_blit_respects_alpha() {
        let red = Rgba::rgb(255, 0, 0);
        let mut dst = Sprite::filled(2, 1, red);
        let mut src = Sprite::new(2, 1);
        src.set(1, 0, Rgba::WHITE);

        dst.blit(&src, IVec2::ZERO);
        assert_eq!(dst.get(0, 0), Some(red));
        assert_eq!(dst.get(1, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_from_rgba8_round_trips_bytes() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let sprite = Sprite::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(sprite.get(1, 0), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(sprite.as_bytes(), &bytes);

        assert!(Sprite::from_rgba8(3, 1, &bytes).is_none());
    }
}
