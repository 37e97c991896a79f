use serde::{Deserialize, Serialize};

/// Float slack used by overlap tests so that rooms sharing an edge never count
/// as overlapping because of rounding.
pub const OVERLAP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Rotates around `pivot` by `degrees`, counter-clockwise.
    pub fn rotate_around(self, pivot: Point, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle in plan coordinates (feet, y grows north).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self { x, y, width, depth }
    }

    pub fn at(origin: Point, width: f64, depth: f64) -> Self {
        Self::new(origin.x, origin.y, width, depth)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.depth
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.depth / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    pub fn with_origin(&self, origin: Point) -> Self {
        Self::at(origin, self.width, self.depth)
    }

    /// Interior intersection; rectangles that only touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - OVERLAP_EPSILON
            && self.right() > other.x + OVERLAP_EPSILON
            && self.y < other.top() - OVERLAP_EPSILON
            && self.top() > other.y + OVERLAP_EPSILON
    }

    /// True when the rectangle lies inside `[0, width] x [0, depth]`.
    pub fn within(&self, width: f64, depth: f64) -> bool {
        self.x >= -OVERLAP_EPSILON
            && self.y >= -OVERLAP_EPSILON
            && self.right() <= width + OVERLAP_EPSILON
            && self.top() <= depth + OVERLAP_EPSILON
    }

    /// Two rooms share a wall when one edge coordinate matches within
    /// `tolerance` and their extents overlap on the perpendicular axis.
    pub fn shares_wall(&self, other: &Rect, tolerance: f64) -> bool {
        let side_by_side = (self.right() - other.x).abs() <= tolerance
            || (other.right() - self.x).abs() <= tolerance;
        if side_by_side && self.y < other.top() && self.top() > other.y {
            return true;
        }
        let stacked = (self.top() - other.y).abs() <= tolerance
            || (other.top() - self.y).abs() <= tolerance;
        stacked && self.x < other.right() && self.right() > other.x
    }

    /// Corner points in counter-clockwise order starting at the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.top()),
            Point::new(self.x, self.top()),
        ]
    }

    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.depth - 2.0 * amount).max(0.0),
        )
    }
}

/// Bounding extents accumulated over arbitrary points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    pub fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn merge(&mut self, other: &Bounds) {
        self.include(Point::new(other.min_x, other.min_y));
        self.include(Point::new(other.max_x, other.max_y));
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn pad(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rooms_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 15.0, 12.0);
        let b = Rect::new(15.0, 0.0, 10.0, 8.0);
        assert!(!a.overlaps(&b));
        assert!(a.shares_wall(&b, 0.5));
    }

    #[test]
    fn overlapping_rooms_detected() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn shared_wall_needs_perpendicular_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let corner_only = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!a.shares_wall(&corner_only, 0.5));
        let near = Rect::new(10.4, 2.0, 5.0, 5.0);
        assert!(a.shares_wall(&near, 0.5));
        let far = Rect::new(11.0, 2.0, 5.0, 5.0);
        assert!(!a.shares_wall(&far, 0.5));
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotate_around(Point::ORIGIN, 90.0);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }
}
