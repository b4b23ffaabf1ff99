use serde::{Deserialize, Serialize};

/// Position on an activity canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamps each axis into `[min, max]`.
    pub fn clamp(&self, min: Point, max: Point) -> Point {
        Point {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn clamp_keeps_inside() {
        let p = Point::new(-10.0, 900.0).clamp(Point::new(15.0, 15.0), Point::new(485.0, 285.0));
        assert_eq!(p, Point::new(15.0, 285.0));
    }
}
