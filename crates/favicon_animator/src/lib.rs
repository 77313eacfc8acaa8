//! Favicon outline animation.
//!
//! Hovering the page's button traces a square outline into the favicon over
//! 100 ticks, one edge per quarter. Each tick clears an offscreen 32x32
//! surface, strokes the outline so far with a diagonal gradient, and
//! republishes the surface as the favicon's `data:` URL.
//!
//! The animator never looks anything up itself. The surface, trigger,
//! favicon link and timer are passed in through the traits in [`surface`]
//! and [`host`]. On `wasm32` the `web` module finds them in the DOM and
//! mounts one animator for the page. Natively, [`RasterSurface`] renders
//! the same frames with `tiny-skia`.
//!
//! ```rust
//! use favicon_animator::{AnimatorConfig, Outline, Stage};
//!
//! let config = AnimatorConfig::default();
//! let outline = Outline::at(37, config.size, config.total_ticks);
//! assert_eq!(outline.stage(), Stage::Right);
//! assert!((outline.edge_length(Stage::Right) - 15.36).abs() < 1e-3);
//! ```

pub mod animator;
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod outline;
pub mod raster;
pub mod state;
pub mod surface;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animator::{Collaborators, FaviconAnimator};
pub use color::Rgba;
pub use config::AnimatorConfig;
pub use diagnostics::{AnimatorDiagnostics, Phase};
pub use error::{ColorError, Result, SetupError, SurfaceError, TickerError};
pub use geometry::{Point, Segment};
pub use host::{FaviconLink, Ticker, TriggerElement};
pub use outline::{Outline, Stage, TracedEdge};
pub use raster::RasterSurface;
pub use state::{AnimationState, TickOutcome};
pub use surface::{DrawingSurface, LinearGradient, StrokeStyle};

#[cfg(target_arch = "wasm32")]
pub use web::favicon_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn favicon_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"favicon diagnostics only available on wasm\"}".to_string()
}
