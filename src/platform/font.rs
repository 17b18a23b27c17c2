//! Bitmap font for the score display

use super::TextRenderer;
use crate::sprite::{Rgba, Sprite};

const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// 3x5 digit font scaled up by an integer factor
///
/// Characters other than ASCII digits render as blank cells.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    scale: i32,
}

impl Default for BitmapFont {
    /// Roughly 32px tall text
    fn default() -> Self {
        Self::new(6)
    }
}

impl BitmapFont {
    pub fn new(scale: i32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Pixel size of `text` when rendered
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let n = text.chars().count() as i32;
        if n == 0 {
            return (0, 0);
        }
        // One blank column between glyphs
        let w = (n * (GLYPH_W + 1) - 1) * self.scale;
        (w as u32, (GLYPH_H * self.scale) as u32)
    }
}

impl TextRenderer for BitmapFont {
    fn render(&mut self, text: &str, color: Rgba) -> Sprite {
        let (w, h) = self.measure(text);
        let mut sprite = Sprite::new(w, h);
        let s = self.scale;

        for (i, ch) in text.chars().enumerate() {
            let Some(d) = ch.to_digit(10) else {
                continue;
            };
            let glyph = &DIGITS[d as usize];
            let x0 = i as i32 * (GLYPH_W + 1) * s;
            for row in 0..GLYPH_H {
                for col in 0..GLYPH_W {
                    if glyph[(row * GLYPH_W + col) as usize] == 1 {
                        sprite.fill_rect(x0 + col * s, row * s, s, s, color);
                    }
                }
            }
        }
        sprite
    }
}
