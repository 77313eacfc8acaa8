//! The drawable surface the animator paints each frame onto.

use serde::Serialize;

use crate::color::Rgba;
use crate::error::SurfaceError;
use crate::geometry::Point;

/// Two-stop linear gradient between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub start: Rgba,
    pub end: Rgba,
}

/// Stroke paint applied by [`DrawingSurface::stroke`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub gradient: LinearGradient,
    pub width: f32,
}

/// Subset of a 2D canvas context needed to draw the outline.
///
/// Path calls follow canvas semantics: `begin_path` discards the current
/// path, `stroke` paints it without consuming it.
pub trait DrawingSurface {
    /// Set the pixel dimensions to `size x size`.
    ///
    /// May reset the stroke style, so callers apply the style afterwards.
    fn resize(&mut self, size: u32);

    fn set_stroke_style(&mut self, style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// Erase every pixel to transparent.
    fn clear(&mut self);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    fn stroke(&mut self);

    /// Serialize the current pixels as an image `data:` URL.
    fn to_data_url(&self) -> Result<String, SurfaceError>;
}
