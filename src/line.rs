//! Polylines and segment lists.

use glam::{Vec3, Vec4};

use crate::drawable::{Drawable, LineTopology};
use crate::vertex::ColorVertex;

/// How the points of a [`Line`] are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineMode {
    /// A continuous line through all points.
    #[default]
    Strip,
    /// Point pairs are separate segments. A trailing unpaired point is skipped.
    Lines,
    /// Like [`LineMode::Strip`], closed back to the first point.
    Loop,
}

/// A single-colored line through a list of points.
///
/// # Example
///
/// ```
/// use glpp::{Drawable, Line, LineMode, Vec3, Vec4};
///
/// let line = Line::segment(Vec3::ZERO, Vec3::X, Vec4::ONE, LineMode::Lines);
/// assert_eq!(line.vertices().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    points: Vec<Vec3>,
    color: Vec4,
    mode: LineMode,
}

impl Default for Line {
    fn default() -> Self {
        Self::new(Vec4::ONE, LineMode::Strip)
    }
}

impl Line {
    /// Creates an empty line.
    pub fn new(color: Vec4, mode: LineMode) -> Self {
        Self::from_points(Vec::new(), color, mode)
    }

    pub fn from_points(points: impl Into<Vec<Vec3>>, color: Vec4, mode: LineMode) -> Self {
        Self {
            points: points.into(),
            color,
            mode,
        }
    }

    /// Creates a line between two points.
    pub fn segment(p1: Vec3, p2: Vec3, color: Vec4, mode: LineMode) -> Self {
        Self::from_points(vec![p1, p2], color, mode)
    }

    /// Number of points, including an unpaired one in [`LineMode::Lines`].
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Replaces the point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_point(&mut self, index: usize, point: Vec3) {
        self.points[index] = point;
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn set_points(&mut self, points: impl Into<Vec<Vec3>>) {
        self.points = points.into();
    }

    pub fn mode(&self) -> LineMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LineMode) {
        self.mode = mode;
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }
}

impl Drawable for Line {
    fn vertices(&self) -> Vec<ColorVertex> {
        let mut points: &[Vec3] = &self.points;
        if self.mode == LineMode::Lines && points.len() % 2 == 1 {
            points = &points[..points.len() - 1];
        }

        let mut vertices: Vec<ColorVertex> = points
            .iter()
            .map(|&p| ColorVertex::new(p, self.color))
            .collect();

        // wgpu has no line loop topology, close the strip by hand
        if self.mode == LineMode::Loop && vertices.len() > 1 {
            vertices.push(vertices[0]);
        }

        vertices
    }

    fn topology(&self) -> LineTopology {
        match self.mode {
            LineMode::Lines => LineTopology::List,
            LineMode::Strip | LineMode::Loop => LineTopology::Strip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(line: &Line) -> Vec<[f32; 3]> {
        line.vertices().iter().map(|v| v.position).collect()
    }

    #[test]
    fn strip_keeps_all_points() {
        let line = Line::from_points(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec4::ONE, LineMode::Strip);
        assert_eq!(line.topology(), LineTopology::Strip);
        assert_eq!(positions(&line), vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn lines_drop_unpaired_point() {
        let line = Line::from_points(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec4::ONE, LineMode::Lines);
        assert_eq!(line.len(), 3);
        assert_eq!(line.topology(), LineTopology::List);
        assert_eq!(positions(&line), vec![[0.0; 3], [1.0, 0.0, 0.0]]);
    }

    #[test]
    fn loop_closes_back_to_start() {
        let line = Line::from_points(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec4::ONE, LineMode::Loop);
        let p = positions(&line);
        assert_eq!(p.len(), 4);
        assert_eq!(p[0], p[3]);
    }

    #[test]
    fn single_point_loop_stays_single() {
        let line = Line::from_points(vec![Vec3::ONE], Vec4::ONE, LineMode::Loop);
        assert_eq!(line.vertices().len(), 1);
    }

    #[test]
    fn color_applies_to_every_vertex() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let mut line = Line::segment(Vec3::ZERO, Vec3::Z, Vec4::ONE, LineMode::Strip);
        line.set_color(red);
        assert!(line.vertices().iter().all(|v| v.color == red.to_array()));
    }

    #[test]
    fn point_access() {
        let mut line = Line::default();
        assert!(line.is_empty());
        assert_eq!(line.point(0), None);

        line.set_points(vec![Vec3::ZERO, Vec3::X]);
        line.set_point(1, Vec3::Y);
        assert_eq!(line.point(1), Some(Vec3::Y));
        assert_eq!(line.points(), &[Vec3::ZERO, Vec3::Y]);
    }

    #[test]
    #[should_panic]
    fn set_point_out_of_range_panics() {
        let mut line = Line::default();
        line.set_point(0, Vec3::ONE);
    }
}
