//! The four-stage outline state machine.
//!
//! A run traces the square clockwise from the top-left corner: top edge,
//! right edge, bottom edge, left edge. Each edge takes a quarter of the run's
//! ticks. [`Outline::at`] maps a progress value to the segments to stroke.

use serde::Serialize;

use crate::geometry::{Point, Segment};
use crate::surface::DrawingSurface;

/// Which edge is currently growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Top,
    Right,
    Bottom,
    Left,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Top, Stage::Right, Stage::Bottom, Stage::Left];

    /// Stage for `progress` out of `total_ticks`.
    ///
    /// Boundaries belong to the earlier stage: with 100 ticks, 25 is still
    /// `Top` (drawn full length) and 26 is the first `Right` tick.
    pub fn for_progress(progress: u32, total_ticks: u32) -> Self {
        let quarter = (total_ticks / 4).max(1);
        match progress.min(total_ticks) {
            p if p <= quarter => Stage::Top,
            p if p <= quarter * 2 => Stage::Right,
            p if p <= quarter * 3 => Stage::Bottom,
            _ => Stage::Left,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Stage::Top => 0,
            Stage::Right => 1,
            Stage::Bottom => 2,
            Stage::Left => 3,
        }
    }

    /// The full edge this stage traces on a `size` pixel square, oriented in
    /// drawing direction.
    pub fn edge(self, size: f32) -> Segment {
        let top_left = Point::ZERO;
        let top_right = Point::new(size, 0.0);
        let bottom_right = Point::new(size, size);
        let bottom_left = Point::new(0.0, size);
        match self {
            Stage::Top => Segment::new(top_left, top_right),
            Stage::Right => Segment::new(top_right, bottom_right),
            Stage::Bottom => Segment::new(bottom_right, bottom_left),
            Stage::Left => Segment::new(bottom_left, top_left),
        }
    }
}

/// One stroked piece of the outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracedEdge {
    pub stage: Stage,
    pub segment: Segment,
}

/// Everything drawn for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    stage: Stage,
    edges: Vec<TracedEdge>,
}

impl Outline {
    /// Outline after `progress` ticks of a `total_ticks` run on a `size`
    /// pixel square.
    pub fn at(progress: u32, size: u32, total_ticks: u32) -> Self {
        let size = size as f32;
        let quarter = (total_ticks / 4).max(1);
        let progress = progress.min(total_ticks);
        let stage = Stage::for_progress(progress, total_ticks);

        let mut edges: Vec<TracedEdge> = Stage::ALL[..stage.index() as usize]
            .iter()
            .map(|&done| TracedEdge {
                stage: done,
                segment: done.edge(size),
            })
            .collect();

        let along = progress - stage.index() * quarter;
        let length = (size * along as f32 / quarter as f32).clamp(0.0, size);
        edges.push(TracedEdge {
            stage,
            segment: stage.edge(size).truncated(length),
        });

        Self { stage, edges }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn edges(&self) -> &[TracedEdge] {
        &self.edges
    }

    /// Length drawn along the edge belonging to `stage`; zero if that edge
    /// has not started.
    pub fn edge_length(&self, stage: Stage) -> f32 {
        self.edges
            .iter()
            .find(|edge| edge.stage == stage)
            .map(|edge| edge.segment.length())
            .unwrap_or(0.0)
    }

    /// True once all four edges are drawn full length.
    pub fn is_closed(&self, size: u32) -> bool {
        let size = size as f32;
        Stage::ALL
            .iter()
            .all(|&stage| (self.edge_length(stage) - size).abs() < 1e-3)
    }

    /// Append this outline to the surface's current path as one polyline.
    pub fn trace<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let Some(first) = self.edges.first() else {
            return;
        };
        surface.move_to(first.segment.from);
        for edge in &self.edges {
            surface.line_to(edge.segment.to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: u32 = 32;
    const TOTAL: u32 = 100;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(Stage::for_progress(0, TOTAL), Stage::Top);
        assert_eq!(Stage::for_progress(25, TOTAL), Stage::Top);
        assert_eq!(Stage::for_progress(26, TOTAL), Stage::Right);
        assert_eq!(Stage::for_progress(50, TOTAL), Stage::Right);
        assert_eq!(Stage::for_progress(51, TOTAL), Stage::Bottom);
        assert_eq!(Stage::for_progress(75, TOTAL), Stage::Bottom);
        assert_eq!(Stage::for_progress(76, TOTAL), Stage::Left);
        assert_eq!(Stage::for_progress(100, TOTAL), Stage::Left);
        assert_eq!(Stage::for_progress(250, TOTAL), Stage::Left);
    }

    #[test]
    fn test_top_edge_grows_linearly() {
        for progress in 0..=25 {
            let outline = Outline::at(progress, SIZE, TOTAL);
            let expected = (32.0 / 25.0 * progress as f32).clamp(0.0, 32.0);
            assert!(
                approx(outline.edge_length(Stage::Top), expected),
                "progress {progress}"
            );
            assert_eq!(outline.edges().len(), 1);
        }
    }

    #[test]
    fn test_scenario_top_partial() {
        let outline = Outline::at(12, SIZE, TOTAL);
        assert_eq!(outline.stage(), Stage::Top);
        assert!(approx(outline.edge_length(Stage::Top), 15.36));
        assert_eq!(outline.edges()[0].segment.from, Point::ZERO);
    }

    #[test]
    fn test_scenario_right_partial() {
        let outline = Outline::at(37, SIZE, TOTAL);
        assert_eq!(outline.stage(), Stage::Right);
        assert!(approx(outline.edge_length(Stage::Top), 32.0));
        assert!(approx(outline.edge_length(Stage::Right), 15.36));
        let right = outline.edges()[1].segment;
        assert_eq!(right.from, Point::new(32.0, 0.0));
        assert!(approx(right.to.y, 15.36));
    }

    #[test]
    fn test_quartile_boundaries_are_full_edges() {
        let at_25 = Outline::at(25, SIZE, TOTAL);
        assert!(approx(at_25.edge_length(Stage::Top), 32.0));
        assert_eq!(at_25.edge_length(Stage::Right), 0.0);

        let at_50 = Outline::at(50, SIZE, TOTAL);
        assert!(approx(at_50.edge_length(Stage::Top), 32.0));
        assert!(approx(at_50.edge_length(Stage::Right), 32.0));
        assert_eq!(at_50.edge_length(Stage::Bottom), 0.0);

        let at_75 = Outline::at(75, SIZE, TOTAL);
        assert!(approx(at_75.edge_length(Stage::Bottom), 32.0));
        assert_eq!(at_75.edge_length(Stage::Left), 0.0);
        assert!(!at_75.is_closed(SIZE));
    }

    #[test]
    fn test_next_stage_starts_small() {
        let outline = Outline::at(51, SIZE, TOTAL);
        let bottom = outline.edges()[2].segment;
        assert_eq!(bottom.from, Point::new(32.0, 32.0));
        assert!(approx(bottom.to.x, 32.0 / 25.0 * 24.0));
        assert!(approx(outline.edge_length(Stage::Bottom), 1.28));

        let outline = Outline::at(76, SIZE, TOTAL);
        let left = outline.edges()[3].segment;
        assert_eq!(left.from, Point::new(0.0, 32.0));
        assert!(approx(left.to.y, 32.0 / 25.0 * 24.0));
    }

    #[test]
    fn test_final_frame_is_closed_square() {
        let outline = Outline::at(100, SIZE, TOTAL);
        assert_eq!(outline.edges().len(), 4);
        assert!(outline.is_closed(SIZE));
        assert_eq!(outline.edges()[3].segment.to, Point::ZERO);
    }

    #[test]
    fn test_custom_tick_count() {
        let outline = Outline::at(5, 16, 8);
        assert_eq!(outline.stage(), Stage::Bottom);
        assert!(approx(outline.edge_length(Stage::Right), 16.0));
        assert!(approx(outline.edge_length(Stage::Bottom), 8.0));
    }
}
