//! Sampled points and the polylines built from them.

use serde::{Deserialize, Serialize};

/// A sampled pointer location in device-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Identity of a stroke, stable across undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrokeId(pub u64);

/// One continuous pen gesture: points connected in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Creates an empty stroke.
    pub fn new(id: StrokeId) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any sampled point lies within `radius` of `point`.
    ///
    /// Only the samples are tested, not the segments between them.
    pub fn has_point_near(&self, point: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance_to(point) <= radius)
    }

    /// Consecutive point pairs, i.e. the visible segments of the stroke.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let d = Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn proximity_checks_samples_only() {
        let mut stroke = Stroke::new(StrokeId(1));
        stroke.points.push(Point::new(0.0, 0.0));
        stroke.points.push(Point::new(100.0, 0.0));

        assert!(stroke.has_point_near(Point::new(3.0, 4.0), 5.0));
        assert!(!stroke.has_point_near(Point::new(50.0, 0.0), 5.0));
    }

    #[test]
    fn single_point_stroke_has_no_segments() {
        let mut stroke = Stroke::new(StrokeId(1));
        assert_eq!(stroke.segments().count(), 0);

        stroke.points.push(Point::new(1.0, 1.0));
        assert_eq!(stroke.segments().count(), 0);

        stroke.points.push(Point::new(2.0, 2.0));
        stroke.points.push(Point::new(3.0, 3.0));
        assert_eq!(stroke.segments().count(), 2);
    }
}
