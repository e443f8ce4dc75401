//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Runtime options for the walker.
///
/// `Config::default()` yields the same values as running without flags.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "mazewalk", about = "First-person walk through a textured maze")]
pub struct Config {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 1360)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Aspect ratio of the main view, as `16/9`, `16:9` or a decimal
    #[arg(long, default_value = "16/9", value_parser = parse_ratio)]
    pub aspect: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0, value_parser = parse_positive)]
    pub fov: f32,

    /// Near clipping plane
    #[arg(long, default_value_t = 0.1, value_parser = parse_positive)]
    pub near: f32,

    /// Far clipping plane
    #[arg(long, default_value_t = 500.0, value_parser = parse_positive)]
    pub far: f32,

    /// Image for the maze walls
    #[arg(long)]
    pub wall_texture: Option<PathBuf>,

    /// Image for the floor, tiled
    #[arg(long)]
    pub floor_texture: Option<PathBuf>,

    /// Image for the scrolling sky
    #[arg(long)]
    pub sky_texture: Option<PathBuf>,

    /// Image for the player sprite
    #[arg(long)]
    pub sprite_texture: Option<PathBuf>,

    /// Log filter, overridden by `RUST_LOG`
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["mazewalk"])
    }
}

fn parse_positive(value: &str) -> Result<f32, String> {
    let parsed: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("`{value}` must be a positive number"))
    }
}

fn parse_ratio(value: &str) -> Result<f32, String> {
    match value.split_once(['/', ':']) {
        Some((num, den)) => Ok(parse_positive(num)? / parse_positive(den)?),
        None => parse_positive(value),
    }
}
