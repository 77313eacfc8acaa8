//! Points and line segments in surface pixel space.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to`.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A straight stroke from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// The leading part of this segment, `length` pixels long.
    ///
    /// The length is clamped to `[0, self.length()]`.
    pub fn truncated(&self, length: f32) -> Self {
        let full = self.length();
        if full <= f32::EPSILON {
            return *self;
        }
        let t = (length / full).clamp(0.0, 1.0);
        Self::new(self.from, self.from.lerp(self.to, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length() {
        let segment = Segment::new(Point::new(32.0, 32.0), Point::new(0.0, 32.0));
        assert!((segment.length() - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_truncated_keeps_origin_and_direction() {
        let segment = Segment::new(Point::new(32.0, 32.0), Point::new(0.0, 32.0));
        let part = segment.truncated(8.0);
        assert_eq!(part.from, Point::new(32.0, 32.0));
        assert_eq!(part.to, Point::new(24.0, 32.0));
    }

    #[test]
    fn test_truncated_clamps() {
        let segment = Segment::new(Point::ZERO, Point::new(10.0, 0.0));
        assert_eq!(segment.truncated(-3.0).to, Point::ZERO);
        assert_eq!(segment.truncated(99.0).to, Point::new(10.0, 0.0));
    }
}
