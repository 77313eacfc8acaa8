//! Software [`DrawingSurface`] backed by a `tiny-skia` pixmap.
//!
//! Produces the same `data:image/png;base64,...` URLs a browser canvas does,
//! so the animator can run (and be checked pixel by pixel) off the page.

use base64::Engine;
use tiny_skia::{
    GradientStop, LinearGradient as SkiaGradient, Paint, PathBuilder, Pixmap, Shader, SpreadMode,
    Stroke, Transform,
};

use crate::error::SurfaceError;
use crate::geometry::Point;
use crate::surface::{DrawingSurface, StrokeStyle};

#[derive(Debug, Clone, Copy)]
enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

pub struct RasterSurface {
    pixmap: Pixmap,
    path: Vec<PathCommand>,
    style: Option<StrokeStyle>,
}

impl RasterSurface {
    /// A transparent `size x size` surface. `None` when `size` is zero.
    pub fn new(size: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(size, size)?,
            path: Vec::new(),
            style: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Alpha of the pixel at `(x, y)`, if inside the surface.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixmap.pixel(x, y).map(|pixel| pixel.alpha())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|err| SurfaceError::Encode(err.to_string()))
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for command in &self.path {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            }
        }
        builder.finish()
    }
}

fn gradient_shader(style: &StrokeStyle) -> Option<Shader<'static>> {
    let gradient = &style.gradient;
    SkiaGradient::new(
        tiny_skia::Point::from_xy(gradient.from.x, gradient.from.y),
        tiny_skia::Point::from_xy(gradient.to.x, gradient.to.y),
        vec![
            GradientStop::new(0.0, gradient.start.into()),
            GradientStop::new(1.0, gradient.end.into()),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
}

impl DrawingSurface for RasterSurface {
    fn resize(&mut self, size: u32) {
        match Pixmap::new(size, size) {
            Some(pixmap) => self.pixmap = pixmap,
            None => tracing::warn!(size, "ignoring resize to an empty surface"),
        }
        // Resizing a canvas resets its context state.
        self.path.clear();
        self.style = None;
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) -> Result<(), SurfaceError> {
        if gradient_shader(style).is_none() {
            return Err(SurfaceError::Gradient(format!(
                "cannot build a gradient from {:?} to {:?}",
                style.gradient.from, style.gradient.to
            )));
        }
        self.style = Some(*style);
        Ok(())
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.path.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.path.push(PathCommand::LineTo(point));
    }

    fn stroke(&mut self) {
        let Some(style) = self.style else {
            tracing::debug!("stroke without a stroke style");
            return;
        };
        // Zero-length paths have no bounds and paint nothing.
        let Some(path) = self.build_path() else {
            return;
        };
        let Some(shader) = gradient_shader(&style) else {
            return;
        };

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = true;

        let mut stroke = Stroke::default();
        stroke.width = style.width;

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimatorConfig;
    use crate::outline::Outline;

    fn styled_surface(config: &AnimatorConfig) -> RasterSurface {
        let mut surface = RasterSurface::new(1).unwrap();
        surface.resize(config.size);
        surface.set_stroke_style(&config.stroke_style()).unwrap();
        surface
    }

    fn draw(surface: &mut RasterSurface, outline: &Outline) {
        surface.clear();
        surface.begin_path();
        outline.trace(surface);
        surface.stroke();
    }

    #[test]
    fn test_new_rejects_empty_surface() {
        assert!(RasterSurface::new(0).is_none());
    }

    #[test]
    fn test_partial_top_edge_pixels() {
        let config = AnimatorConfig::default();
        let mut surface = styled_surface(&config);
        draw(&mut surface, &Outline::at(12, config.size, config.total_ticks));

        assert_eq!(surface.alpha_at(5, 1), Some(255));
        assert_eq!(surface.alpha_at(25, 1), Some(0));
        assert_eq!(surface.alpha_at(1, 16), Some(0));
    }

    #[test]
    fn test_closed_outline_pixels() {
        let config = AnimatorConfig::default();
        let mut surface = styled_surface(&config);
        draw(&mut surface, &Outline::at(100, config.size, config.total_ticks));

        for (x, y) in [(16, 1), (30, 16), (16, 30), (1, 16)] {
            assert_eq!(surface.alpha_at(x, y), Some(255), "edge pixel ({x}, {y})");
        }
        assert_eq!(surface.alpha_at(16, 16), Some(0));
    }

    #[test]
    fn test_clear_erases_previous_frame() {
        let config = AnimatorConfig::default();
        let mut surface = styled_surface(&config);
        draw(&mut surface, &Outline::at(100, config.size, config.total_ticks));
        surface.clear();
        assert_eq!(surface.alpha_at(16, 1), Some(0));
    }

    #[test]
    fn test_gradient_runs_start_to_end_colour() {
        let config = AnimatorConfig::default();
        let mut surface = styled_surface(&config);
        draw(&mut surface, &Outline::at(100, config.size, config.total_ticks));

        // Near the top-left corner the stroke is close to the start colour,
        // near the bottom-right it is close to the end colour.
        let near_start = surface.pixmap().pixel(1, 1).unwrap();
        let near_end = surface.pixmap().pixel(30, 30).unwrap();
        assert!(near_start.red() > near_end.red());
        assert!(near_start.blue() > near_end.blue());
    }

    #[test]
    fn test_non_finite_gradient_is_rejected() {
        let mut style = AnimatorConfig::default().stroke_style();
        style.gradient.to = Point::new(f32::NAN, 0.0);

        let mut surface = RasterSurface::new(1).unwrap();
        assert!(matches!(
            surface.set_stroke_style(&style),
            Err(SurfaceError::Gradient(_))
        ));
    }

    #[test]
    fn test_data_url_decodes_to_png() {
        let config = AnimatorConfig::default();
        let mut surface = styled_surface(&config);
        draw(&mut surface, &Outline::at(100, config.size, config.total_ticks));

        let url = surface.to_data_url().unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let png = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        let decoded = Pixmap::decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
        assert_eq!(decoded.pixel(16, 1).unwrap().alpha(), 255);
    }
}
