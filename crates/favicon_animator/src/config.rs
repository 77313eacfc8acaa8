//! Compiled-in animation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::SetupError;
use crate::geometry::Point;
use crate::surface::{LinearGradient, StrokeStyle};

/// Favicon edge length in pixels.
pub const DEFAULT_SIZE: u32 = 32;
/// Ticks in one full run; the outline closes on the last one.
pub const DEFAULT_TOTAL_TICKS: u32 = 100;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(60);
pub const DEFAULT_STROKE_WIDTH: f32 = 8.0;
pub const DEFAULT_GRADIENT_START: Rgba = Rgba::from_hex(0xC7F0FE);
pub const DEFAULT_GRADIENT_END: Rgba = Rgba::from_hex(0x56D3C9);

/// Settings for one [`FaviconAnimator`](crate::FaviconAnimator).
///
/// The page never overrides these; `Default` carries the values the site
/// ships with and tests build variants through the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub size: u32,
    pub total_ticks: u32,
    #[serde(rename = "tick_interval_ms", with = "duration_ms")]
    pub tick_interval: Duration,
    pub stroke_width: f32,
    pub gradient_start: Rgba,
    pub gradient_end: Rgba,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            total_ticks: DEFAULT_TOTAL_TICKS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            stroke_width: DEFAULT_STROKE_WIDTH,
            gradient_start: DEFAULT_GRADIENT_START,
            gradient_end: DEFAULT_GRADIENT_END,
        }
    }
}

impl AnimatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_total_ticks(mut self, total_ticks: u32) -> Self {
        self.total_ticks = total_ticks;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_gradient(mut self, start: Rgba, end: Rgba) -> Self {
        self.gradient_start = start;
        self.gradient_end = end;
        self
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.size == 0 {
            return Err(SetupError::InvalidConfig("size must be non-zero".into()));
        }
        if self.total_ticks == 0 || self.total_ticks % 4 != 0 {
            return Err(SetupError::InvalidConfig(format!(
                "total_ticks must be a non-zero multiple of 4, got {}",
                self.total_ticks
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(SetupError::InvalidConfig(
                "tick_interval must be non-zero".into(),
            ));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(SetupError::InvalidConfig(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// Ticks spent on each edge of the square.
    pub fn ticks_per_edge(&self) -> u32 {
        self.total_ticks / 4
    }

    /// Wall-clock length of one run.
    pub fn run_duration(&self) -> Duration {
        self.tick_interval * self.total_ticks
    }

    /// Diagonal gradient from the top-left to the bottom-right corner.
    pub fn stroke_style(&self) -> StrokeStyle {
        let size = self.size as f32;
        StrokeStyle {
            gradient: LinearGradient {
                from: Point::ZERO,
                to: Point::new(size, size),
                start: self.gradient_start,
                end: self.gradient_end,
            },
            width: self.stroke_width,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
