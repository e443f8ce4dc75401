//! Texture sources.
//!
//! Every textured unit names a [`TextureSource`]. Image files are decoded with
//! `image` at setup; a file that cannot be read falls back to the procedural
//! [`Pattern`] it names, so the walker always starts with something on its
//! walls.

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

/// Built-in textures generated in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Brick,
    Rocks,
    Sky,
    Sprite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    File { path: PathBuf, fallback: Pattern },
    Procedural(Pattern),
}

impl TextureSource {
    /// A file source when `path` is set, otherwise the pattern itself.
    pub fn file_or(path: Option<PathBuf>, fallback: Pattern) -> Self {
        match path {
            Some(path) => TextureSource::File { path, fallback },
            None => TextureSource::Procedural(fallback),
        }
    }

    /// Decodes the source into RGBA8 pixels.
    pub fn load(&self) -> RgbaImage {
        match self {
            TextureSource::Procedural(pattern) => pattern.generate(),
            TextureSource::File { path, fallback } => match image::open(path) {
                Ok(img) => {
                    let img = img.to_rgba8();
                    debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded texture");
                    img
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, ?fallback, "texture failed to load, using built-in pattern");
                    fallback.generate()
                }
            },
        }
    }
}

/// Cheap integer hash for repeatable noise.
fn noise(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = x.wrapping_mul(374_761_393)
        ^ y.wrapping_mul(668_265_263)
        ^ seed.wrapping_mul(2_246_822_519);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

impl Pattern {
    pub fn generate(self) -> RgbaImage {
        match self {
            Pattern::Brick => brick(),
            Pattern::Rocks => rocks(),
            Pattern::Sky => sky(),
            Pattern::Sprite => sprite(),
        }
    }
}

const BRICK_SIZE: u32 = 64;
const BRICK_ROW: u32 = 16;
const BRICK_LENGTH: u32 = 32;

fn brick() -> RgbaImage {
    RgbaImage::from_fn(BRICK_SIZE, BRICK_SIZE, |x, y| {
        let course = y / BRICK_ROW;
        let shift = if course % 2 == 1 { BRICK_LENGTH / 2 } else { 0 };
        let mortar = y % BRICK_ROW == 0 || (x + shift) % BRICK_LENGTH == 0;
        if mortar {
            Rgba([170, 168, 160, 255])
        } else {
            let grain = (noise(x, y, 1) % 24) as u8;
            Rgba([140 + grain, 58 + grain / 2, 44, 255])
        }
    })
}

fn rocks() -> RgbaImage {
    RgbaImage::from_fn(64, 64, |x, y| {
        let blotch = (noise(x / 8, y / 8, 2) % 40) as u8;
        let grain = (noise(x, y, 3) % 30) as u8;
        let v = 70 + blotch + grain;
        Rgba([v, v.saturating_sub(8), v.saturating_sub(18), 255])
    })
}

const SKY_WIDTH: u32 = 256;
const SKY_HEIGHT: u32 = 128;
const CLOUD_CELL: u32 = 16;

fn sky() -> RgbaImage {
    let columns = SKY_WIDTH / CLOUD_CELL;
    RgbaImage::from_fn(SKY_WIDTH, SKY_HEIGHT, |x, y| {
        let t = y as f32 / (SKY_HEIGHT - 1) as f32;
        let mix = |top: f32, bottom: f32| (top + (bottom - top) * t) as u8;
        let mut color = [mix(30.0, 150.0), mix(60.0, 190.0), mix(140.0, 230.0)];

        // cells wrap on x so the sky tiles as it scrolls
        let cloudy = y < SKY_HEIGHT / 2 && noise((x / CLOUD_CELL) % columns, y / 8, 4) % 5 == 0;
        if cloudy {
            for c in color.iter_mut() {
                *c = c.saturating_add(60);
            }
        }
        Rgba([color[0], color[1], color[2], 255])
    })
}

fn sprite() -> RgbaImage {
    RgbaImage::from_fn(32, 32, |x, y| {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        let head = (fx - 16.0).powi(2) + (fy - 8.0).powi(2) <= 25.0;
        let body = (11.0..21.0).contains(&fx) && (13.0..24.0).contains(&fy);
        let legs = (24.0..32.0).contains(&fy)
            && ((11.0..15.0).contains(&fx) || (17.0..21.0).contains(&fx));
        if head {
            Rgba([230, 190, 150, 255])
        } else if body {
            Rgba([200, 40, 40, 255])
        } else if legs {
            Rgba([40, 40, 120, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_deterministic() {
        for pattern in [Pattern::Brick, Pattern::Rocks, Pattern::Sky, Pattern::Sprite] {
            assert_eq!(pattern.generate(), pattern.generate(), "{pattern:?}");
        }
    }

    #[test]
    fn brick_has_mortar_lines() {
        let img = Pattern::Brick.generate();
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(img.get_pixel(5, 0), &Rgba([170, 168, 160, 255]));
        assert_eq!(img.get_pixel(0, 5), &Rgba([170, 168, 160, 255]));
        assert_ne!(img.get_pixel(5, 5), &Rgba([170, 168, 160, 255]));
        // odd courses are offset by half a brick
        assert_eq!(img.get_pixel(16, 20), &Rgba([170, 168, 160, 255]));
    }

    #[test]
    fn sky_is_wide_and_opaque() {
        let img = Pattern::Sky.generate();
        assert_eq!(img.dimensions(), (SKY_WIDTH, SKY_HEIGHT));
        assert!(img.pixels().all(|p| p.0[3] == 255));
        assert!(img.get_pixel(0, 0).0[2] < img.get_pixel(0, SKY_HEIGHT - 1).0[2]);
    }

    #[test]
    fn sprite_has_transparent_surroundings() {
        let img = Pattern::Sprite.generate();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(31, 0).0[3], 0);
        assert_eq!(img.get_pixel(16, 8).0[3], 255);
        assert_eq!(img.get_pixel(16, 18).0[3], 255);
    }

    #[test]
    fn missing_file_falls_back_to_pattern() {
        let source = TextureSource::File {
            path: PathBuf::from("definitely/not/here/rocks.png"),
            fallback: Pattern::Rocks,
        };
        assert_eq!(source.load(), Pattern::Rocks.generate());
    }

    #[test]
    fn file_or_picks_the_right_variant() {
        assert_eq!(
            TextureSource::file_or(None, Pattern::Sky),
            TextureSource::Procedural(Pattern::Sky)
        );
        assert!(matches!(
            TextureSource::file_or(Some("a.png".into()), Pattern::Brick),
            TextureSource::File { fallback: Pattern::Brick, .. }
        ));
    }
}
