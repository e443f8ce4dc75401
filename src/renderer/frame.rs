//! Per-frame render commands.
//!
//! A [`Frame`] is plain data: an ordered list of passes, each targeting one
//! viewport of the [`ScreenLayout`] and listing the draw units to render with
//! their uniforms. Scenes build frames, the backend executes them.

use std::collections::HashSet;

use super::draw_unit::{DepthMode, DrawUnitId};
use crate::error::RenderError;
use crate::math::Matrix;

/// Which region of the window a pass renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewport {
    /// The letterboxed perspective view. Has a depth attachment.
    Main,
    /// The minimap in the main view's top-left corner. Colour only.
    Map,
}

impl Viewport {
    /// Whether a unit with `depth_mode` can be drawn in this viewport's pass.
    pub fn accepts(self, depth_mode: DepthMode) -> bool {
        match self {
            Viewport::Main => matches!(depth_mode, DepthMode::Test | DepthMode::Background),
            Viewport::Map => depth_mode == DepthMode::Disabled,
        }
    }
}

/// Pixel rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Viewport rectangles for the current window size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenLayout {
    pub main: ViewportRect,
    pub map: ViewportRect,
}

impl ScreenLayout {
    /// Fits the largest `aspect` rectangle into the window and centres it.
    ///
    /// The minimap is an eighth of the main view in each dimension, anchored
    /// at the main view's top-left corner. A zero-sized window yields empty
    /// rectangles.
    ///
    /// ```
    /// use mazewalk::renderer::frame::ScreenLayout;
    ///
    /// let layout = ScreenLayout::fit(1600, 900, 16.0 / 9.0);
    /// assert_eq!(layout.main.width, 1600.0);
    /// assert_eq!(layout.map.width, 200.0);
    /// ```
    pub fn fit(window_width: u32, window_height: u32, aspect: f32) -> Self {
        if window_width == 0 || window_height == 0 {
            return Self::default();
        }

        let (w, h) = (window_width as f32, window_height as f32);
        let (width, height) = if w / h < aspect {
            (w, w / aspect)
        } else {
            (h * aspect, h)
        };
        let main = ViewportRect {
            x: (w - width) / 2.0,
            y: (h - height) / 2.0,
            width,
            height,
        };
        let map = ViewportRect {
            x: main.x,
            y: main.y,
            width: width / 8.0,
            height: height / 8.0,
        };
        Self { main, map }
    }

    pub fn rect(&self, viewport: Viewport) -> ViewportRect {
        match viewport {
            Viewport::Main => self.main,
            Viewport::Map => self.map,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }
}

/// Uniform values for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUniforms {
    pub model: Matrix,
    pub view: Matrix,
    pub projection: Matrix,
    pub color: [f32; 4],
    pub uv_offset: [f32; 2],
}

impl Default for DrawUniforms {
    fn default() -> Self {
        Self {
            model: Matrix::identity(),
            view: Matrix::identity(),
            projection: Matrix::identity(),
            color: [1.0, 1.0, 1.0, 1.0],
            uv_offset: [0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub unit: DrawUnitId,
    pub uniforms: DrawUniforms,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub viewport: Viewport,
    /// Colour to clear the whole target to before drawing; `None` keeps it.
    pub clear: Option<[f32; 4]>,
    pub draws: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub layout: ScreenLayout,
    pub passes: Vec<Pass>,
}

impl Frame {
    /// Checks that every draw references a known unit, sits in a pass whose
    /// attachments match its depth mode and appears at most once.
    ///
    /// `lookup` returns a unit's label and depth mode, or `None` if the id
    /// is unknown.
    pub fn validate<'a>(
        &self,
        lookup: impl Fn(DrawUnitId) -> Option<(&'a str, DepthMode)>,
    ) -> Result<(), RenderError> {
        let mut seen = HashSet::new();
        for pass in &self.passes {
            for draw in &pass.draws {
                let (label, depth_mode) =
                    lookup(draw.unit).ok_or(RenderError::UnknownUnit(draw.unit.index()))?;
                if !pass.viewport.accepts(depth_mode) {
                    return Err(RenderError::IncompatiblePass {
                        label: label.to_string(),
                        viewport: pass.viewport,
                    });
                }
                if !seen.insert(draw.unit) {
                    return Err(RenderError::DuplicateDraw {
                        label: label.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_window_letterboxes_left_and_right() {
        let layout = ScreenLayout::fit(2000, 900, 16.0 / 9.0);
        assert_eq!(layout.main.height, 900.0);
        assert!((layout.main.width - 1600.0).abs() < 1e-3);
        assert!((layout.main.x - 200.0).abs() < 1e-3);
        assert_eq!(layout.main.y, 0.0);
    }

    #[test]
    fn tall_window_letterboxes_top_and_bottom() {
        let layout = ScreenLayout::fit(1600, 1200, 16.0 / 9.0);
        assert_eq!(layout.main.width, 1600.0);
        assert!((layout.main.height - 900.0).abs() < 1e-3);
        assert!((layout.main.y - 150.0).abs() < 1e-3);
        assert_eq!(layout.main.x, 0.0);
    }

    #[test]
    fn map_is_an_eighth_at_the_main_corner() {
        let layout = ScreenLayout::fit(1360, 768, 16.0 / 9.0);
        assert_eq!(layout.map.x, layout.main.x);
        assert_eq!(layout.map.y, layout.main.y);
        assert_eq!(layout.map.width, layout.main.width / 8.0);
        assert_eq!(layout.map.height, layout.main.height / 8.0);
        assert_eq!(layout.rect(Viewport::Map), layout.map);
    }

    #[test]
    fn zero_sized_window_has_no_viewports() {
        assert!(ScreenLayout::fit(0, 768, 16.0 / 9.0).is_empty());
        assert!(ScreenLayout::fit(1360, 0, 16.0 / 9.0).is_empty());
        assert!(!ScreenLayout::fit(1360, 768, 16.0 / 9.0).is_empty());
    }

    #[test]
    fn depth_modes_match_pass_attachments() {
        assert!(Viewport::Main.accepts(DepthMode::Test));
        assert!(Viewport::Main.accepts(DepthMode::Background));
        assert!(!Viewport::Main.accepts(DepthMode::Disabled));
        assert!(Viewport::Map.accepts(DepthMode::Disabled));
        assert!(!Viewport::Map.accepts(DepthMode::Test));
    }

    fn frame_with(draws: Vec<(Viewport, usize)>) -> Frame {
        Frame {
            layout: ScreenLayout::default(),
            passes: draws
                .into_iter()
                .map(|(viewport, unit)| Pass {
                    viewport,
                    clear: None,
                    draws: vec![DrawCall {
                        unit: DrawUnitId::new(unit),
                        uniforms: DrawUniforms::default(),
                    }],
                })
                .collect(),
        }
    }

    fn lookup(id: DrawUnitId) -> Option<(&'static str, DepthMode)> {
        match id.index() {
            0 => Some(("walls", DepthMode::Test)),
            1 => Some(("arrow", DepthMode::Disabled)),
            _ => None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_frames() {
        let frame = frame_with(vec![(Viewport::Main, 0), (Viewport::Map, 1)]);
        assert!(frame.validate(lookup).is_ok());
    }

    #[test]
    fn validate_rejects_bad_draws() {
        let unknown = frame_with(vec![(Viewport::Main, 7)]);
        assert!(matches!(
            unknown.validate(lookup),
            Err(RenderError::UnknownUnit(7))
        ));

        let wrong_pass = frame_with(vec![(Viewport::Map, 0)]);
        assert!(matches!(
            wrong_pass.validate(lookup),
            Err(RenderError::IncompatiblePass { viewport: Viewport::Map, .. })
        ));

        let twice = frame_with(vec![(Viewport::Main, 0), (Viewport::Main, 0)]);
        assert!(matches!(
            twice.validate(lookup),
            Err(RenderError::DuplicateDraw { .. })
        ));
    }
}
