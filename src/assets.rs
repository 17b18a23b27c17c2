//! Game sprites by logical name
//!
//! Sprites come either from a directory of PNG files or from the built-in
//! procedural art, which has the same dimensions as the PNG set. Assets are
//! loaded once before the loop starts; any failure aborts startup.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::sprite::{Rgba, Sprite};

/// Logical asset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetName {
    Background,
    PipeEnd,
    PipeBody,
    BirdWingUp,
    BirdWingDown,
}

impl AssetName {
    pub const ALL: [AssetName; 5] = [
        AssetName::Background,
        AssetName::PipeEnd,
        AssetName::PipeBody,
        AssetName::BirdWingUp,
        AssetName::BirdWingDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetName::Background => "background",
            AssetName::PipeEnd => "pipe-end",
            AssetName::PipeBody => "pipe-body",
            AssetName::BirdWingUp => "actor-wingup",
            AssetName::BirdWingDown => "actor-wingdown",
        }
    }

    /// Parse a logical name; `bird-wingup` and `bird-wingdown` are aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bird-wingup" => Some(AssetName::BirdWingUp),
            "bird-wingdown" => Some(AssetName::BirdWingDown),
            _ => Self::ALL.into_iter().find(|n| n.as_str() == s),
        }
    }

    /// File name inside an asset directory
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetName::Background => "background.png",
            AssetName::PipeEnd => "pipe_end.png",
            AssetName::PipeBody => "pipe_body.png",
            AssetName::BirdWingUp => "bird_wing_up.png",
            AssetName::BirdWingDown => "bird_wing_down.png",
        }
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset loading failures
#[derive(Debug)]
pub enum AssetError {
    /// File doesn't exist
    Missing { name: AssetName, path: PathBuf },
    /// File exists but couldn't be read or decoded
    Decode {
        name: AssetName,
        path: PathBuf,
        source: image::ImageError,
    },
    /// Decoded image has no pixels
    Empty { name: AssetName },
    /// No asset has this logical name
    UnknownName(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing { name, path } => {
                write!(f, "asset '{}' not found at {}", name, path.display())
            }
            AssetError::Decode { name, path, source } => {
                write!(f, "failed to load asset '{}' from {}: {}", name, path.display(), source)
            }
            AssetError::Empty { name } => write!(f, "asset '{}' is empty", name),
            AssetError::UnknownName(name) => write!(f, "unknown asset name '{}'", name),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The full sprite set
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Sprite,
    pub pipe_end: Sprite,
    pub pipe_body: Sprite,
    pub bird_wing_up: Sprite,
    pub bird_wing_down: Sprite,
}

impl Assets {
    /// Sprite for a logical name
    pub fn get(&self, name: AssetName) -> &Sprite {
        match name {
            AssetName::Background => &self.background,
            AssetName::PipeEnd => &self.pipe_end,
            AssetName::PipeBody => &self.pipe_body,
            AssetName::BirdWingUp => &self.bird_wing_up,
            AssetName::BirdWingDown => &self.bird_wing_down,
        }
    }

    /// Sprite for a logical name given as a string, e.g. `"pipe-end"`
    pub fn by_name(&self, name: &str) -> Result<&Sprite, AssetError> {
        AssetName::from_str(name)
            .map(|n| self.get(n))
            .ok_or_else(|| AssetError::UnknownName(name.to_string()))
    }

    /// Load every sprite from PNG files in `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let load = |name: AssetName| load_image(name, &dir.join(name.file_name()));
        let assets = Self {
            background: load(AssetName::Background)?,
            pipe_end: load(AssetName::PipeEnd)?,
            pipe_body: load(AssetName::PipeBody)?,
            bird_wing_up: load(AssetName::BirdWingUp)?,
            bird_wing_down: load(AssetName::BirdWingDown)?,
        };
        log::info!("Loaded {} sprites from {}", AssetName::ALL.len(), dir.display());
        Ok(assets)
    }

    /// Procedurally drawn sprite set
    pub fn builtin() -> Self {
        Self {
            background: draw_background(),
            pipe_end: draw_pipe_end(),
            pipe_body: draw_pipe_body(),
            bird_wing_up: draw_bird(true),
            bird_wing_down: draw_bird(false),
        }
    }
}

fn load_image(name: AssetName, path: &Path) -> Result<Sprite, AssetError> {
    if !path.exists() {
        return Err(AssetError::Missing {
            name,
            path: path.to_path_buf(),
        });
    }
    let image = image::open(path)
        .map_err(|source| AssetError::Decode {
            name,
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty { name });
    }
    log::debug!("Loaded {} ({}x{})", name, width, height);
    Sprite::from_rgba8(width, height, image.as_raw()).ok_or(AssetError::Empty { name })
}

const SKY_TOP: Rgba = Rgba::rgb(70, 180, 200);
const SKY_BOT: Rgba = Rgba::rgb(190, 232, 245);
const HILL: Rgba = Rgba::rgb(120, 200, 110);
const GRASS: Rgba = Rgba::rgb(84, 168, 55);
const DIRT: Rgba = Rgba::rgb(210, 185, 110);
const PIPE_L: Rgba = Rgba::rgb(74, 122, 26);
const PIPE_M: Rgba = Rgba::rgb(100, 170, 40);
const PIPE_HI: Rgba = Rgba::rgb(145, 215, 62);
const CAP_DARK: Rgba = Rgba::rgb(60, 100, 20);
const BIRD_Y: Rgba = Rgba::rgb(245, 200, 66);
const BIRD_HI: Rgba = Rgba::rgb(255, 225, 100);
const BIRD_WING: Rgba = Rgba::rgb(230, 160, 40);
const BEAK: Rgba = Rgba::rgb(240, 100, 40);
const EYE: Rgba = Rgba::rgb(255, 255, 255);
const PUPIL: Rgba = Rgba::rgb(20, 20, 20);

/// Half-width background tile: sky gradient, hills, grass and dirt
fn draw_background() -> Sprite {
    let (w, h) = (WIN_WIDTH / 2, WIN_HEIGHT);
    let mut sprite = Sprite::new(w as u32, h as u32);
    let ground = h - 48;

    for y in 0..ground {
        let t = (y * 256 / ground) as u16;
        sprite.fill_rect(0, y, w, 1, SKY_TOP.lerp(SKY_BOT, t));
    }
    for x in 0..w {
        let phase = x as f32 / w as f32 * std::f32::consts::TAU;
        let hill = (24.0 + 14.0 * phase.sin() + 6.0 * (phase * 3.0).cos()) as i32;
        sprite.fill_rect(x, ground - hill, 1, hill, HILL);
    }
    sprite.fill_rect(0, ground, w, 8, GRASS);
    sprite.fill_rect(0, ground + 8, w, h - ground - 8, DIRT);
    sprite
}

/// Horizontal shade across the pipe, darker at the edges
fn pipe_shade(x: i32, width: i32) -> Rgba {
    let t = x * 256 / width.max(1);
    match t {
        0..=31 => PIPE_L,
        32..=95 => PIPE_M.lerp(PIPE_HI, ((t - 32) * 4) as u16),
        96..=191 => PIPE_HI.lerp(PIPE_M, ((t - 96) * 8 / 3) as u16),
        _ => PIPE_L,
    }
}

fn draw_pipe_body() -> Sprite {
    let mut sprite = Sprite::new(PIPE_WIDTH as u32, PIPE_PIECE_HEIGHT as u32);
    for x in 0..PIPE_WIDTH {
        sprite.fill_rect(x, 0, 1, PIPE_PIECE_HEIGHT, pipe_shade(x, PIPE_WIDTH));
    }
    sprite
}

fn draw_pipe_end() -> Sprite {
    let mut sprite = draw_pipe_body();
    sprite.fill_rect(0, 0, PIPE_WIDTH, 3, CAP_DARK);
    sprite.fill_rect(0, PIPE_PIECE_HEIGHT - 3, PIPE_WIDTH, 3, CAP_DARK);
    sprite
}

fn draw_bird(wing_up: bool) -> Sprite {
    let (w, h) = (BIRD_WIDTH, BIRD_HEIGHT);
    let mut sprite = Sprite::new(w as u32, h as u32);

    // Body: ellipse filling most of the box
    let (cx, cy) = (w as f32 / 2.0 - 1.0, h as f32 / 2.0);
    let (rx, ry) = (w as f32 / 2.0 - 3.0, h as f32 / 2.0 - 5.0);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                let color = if dy < -0.3 { BIRD_HI } else { BIRD_Y };
                sprite.set(x, y, color);
            }
        }
    }

    // Wing above or below the body line
    let wing_y = if wing_up { 6 } else { h / 2 + 2 };
    sprite.fill_rect(5, wing_y, 11, 7, BIRD_WING);

    // Eye and beak
    sprite.fill_rect(w - 12, 9, 6, 6, EYE);
    sprite.fill_rect(w - 9, 11, 2, 3, PUPIL);
    sprite.fill_rect(w - 6, h / 2, 6, 4, BEAK);
    sprite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_names_round_trip() {
        for name in AssetName::ALL {
            assert_eq!(AssetName::from_str(name.as_str()), Some(name));
        }
        assert_eq!(AssetName::from_str("bird"), None);
        assert_eq!(AssetName::BirdWingUp.to_string(), "actor-wingup");
        assert_eq!(AssetName::from_str("actor-wingdown"), Some(AssetName::BirdWingDown));
        assert_eq!(AssetName::from_str("bird-wingup"), Some(AssetName::BirdWingUp));
        assert_eq!(AssetName::from_str("bird-wingdown"), Some(AssetName::BirdWingDown));
    }

    #[test]
    fn test_builtin_dimensions() {
        let assets = Assets::builtin();
        assert_eq!(assets.background.width(), 284);
        assert_eq!(assets.background.height(), 512);
        for name in [AssetName::PipeEnd, AssetName::PipeBody] {
            let sprite = assets.get(name);
            assert_eq!((sprite.width(), sprite.height()), (80, 32));
            // Pipes are solid all the way across
            assert!(sprite.pixels().iter().all(|p| p.a == 255));
        }
        for name in [AssetName::BirdWingUp, AssetName::BirdWingDown] {
            let sprite = assets.get(name);
            assert_eq!((sprite.width(), sprite.height()), (32, 32));
            assert_eq!(sprite.get(0, 0).map(|p| p.a), Some(0));
        }
        assert_ne!(assets.bird_wing_up, assets.bird_wing_down);
    }

    #[test]
    fn test_lookup_by_name() {
        let assets = Assets::builtin();
        let end = assets.by_name("pipe-end").unwrap();
        assert_eq!(end, &assets.pipe_end);
        assert_eq!(assets.by_name("actor-wingup").unwrap(), &assets.bird_wing_up);
        assert_eq!(assets.by_name("actor-wingdown").unwrap(), &assets.bird_wing_down);
        assert_eq!(assets.by_name("bird-wingdown").unwrap(), &assets.bird_wing_down);

        let err = assets.by_name("pipe_end").unwrap_err();
        assert!(matches!(&err, AssetError::UnknownName(n) if n == "pipe_end"));
        assert_eq!(err.to_string(), "unknown asset name 'pipe_end'");
    }

    #[test]
    fn test_load_dir_reports_missing_file() {
        let dir = std::env::temp_dir().join("flappy-pipes-no-such-assets");
        match Assets::load_dir(&dir) {
            Err(AssetError::Missing { name, path }) => {
                assert_eq!(name, AssetName::Background);
                assert!(path.ends_with("background.png"));
            }
            other => panic!("expected missing asset, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_dir_round_trips_png() {
        let dir = std::env::temp_dir().join(format!("flappy-pipes-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let builtin = Assets::builtin();
        for name in AssetName::ALL {
            let sprite = builtin.get(name);
            image::save_buffer(
                dir.join(name.file_name()),
                sprite.as_bytes(),
                sprite.width(),
                sprite.height(),
                image::ExtendedColorType::Rgba8,
            )
            .unwrap();
        }

        let loaded = Assets::load_dir(&dir).unwrap();
        assert_eq!(loaded.pipe_end, builtin.pipe_end);
        assert_eq!(loaded.bird_wing_down, builtin.bird_wing_down);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_decode_error_is_reported() {
        let dir = std::env::temp_dir().join(format!("flappy-pipes-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("background.png"), b"not a png").unwrap();

        let err = Assets::load_dir(&dir).unwrap_err();
        assert!(matches!(err, AssetError::Decode { name: AssetName::Background, .. }));
        assert!(std::error::Error::source(&err).is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
