//! Basic geometric types and utilities.

use std::ops::{Add, Sub, Mul, Div};

/// A 2D point/vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Linear interpolation.
    #[inline]
    pub fn lerp(&self, other: &Point, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Exact hash key for position lookups. `-0.0` and `0.0` share a key.
    #[inline]
    pub fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Div<f64> for Point {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl From<delaunator::Point> for Point {
    fn from(p: delaunator::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point> for delaunator::Point {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Compute the circumcenter of a triangle.
/// The circumcenter is equidistant from all three vertices.
pub fn circumcenter(a: &Point, b: &Point, c: &Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let ex = c.x - a.x;
    let ey = c.y - a.y;

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = dx * ey - dy * ex;

    if d.abs() < 1e-10 {
        // Degenerate triangle, return centroid instead
        return Point::new(
            (a.x + b.x + c.x) / 3.0,
            (a.y + b.y + c.y) / 3.0,
        );
    }

    let d = 0.5 / d;
    let x = a.x + (ey * bl - dy * cl) * d;
    let y = a.y + (dx * cl - ex * bl) * d;

    Point::new(x, y)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Map rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if the point lies exactly on one of the four boundary lines.
    pub fn is_on_border(&self, p: &Point) -> bool {
        p.x == self.min.x || p.x == self.max.x ||
        p.y == self.min.y || p.y == self.max.y
    }

    /// Map a point of the box onto [-1, 1]² about the box center.
    pub fn normalize(&self, p: &Point) -> Point {
        Point::new(
            2.0 * (p.x - self.min.x) / self.width() - 1.0,
            2.0 * (p.y - self.min.y) / self.height() - 1.0,
        )
    }

    /// Clamp a point into the box and move it exactly onto the nearest
    /// boundary line.
    pub fn project_to_border(&self, p: &Point) -> Point {
        let x = p.x.clamp(self.min.x, self.max.x);
        let y = p.y.clamp(self.min.y, self.max.y);

        let candidates = [
            ((x - self.min.x).abs(), Point::new(self.min.x, y)),
            ((self.max.x - x).abs(), Point::new(self.max.x, y)),
            ((y - self.min.y).abs(), Point::new(x, self.min.y)),
            ((self.max.y - y).abs(), Point::new(x, self.max.y)),
        ];

        candidates
            .iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(Point::new(x, y), |&(_, snapped)| snapped)
    }

    /// Liang–Barsky clipping of the parametric line `origin + t * dir`,
    /// `t ∈ [t0, t1]`. Returns the visible parameter range, if any.
    ///
    /// `t1` may be infinite (a ray) as long as `dir` is non-zero.
    pub fn clip_line(&self, origin: Point, dir: Point, t0: f64, t1: f64) -> Option<(f64, f64)> {
        let mut lo = t0;
        let mut hi = t1;

        let constraints = [
            (-dir.x, origin.x - self.min.x),
            (dir.x, self.max.x - origin.x),
            (-dir.y, origin.y - self.min.y),
            (dir.y, self.max.y - origin.y),
        ];

        for (p, q) in constraints {
            if p == 0.0 {
                // Parallel to this boundary
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > hi {
                    return None;
                }
                lo = lo.max(r);
            } else {
                if r < lo {
                    return None;
                }
                hi = hi.min(r);
            }
        }

        if lo > hi || !hi.is_finite() {
            return None;
        }
        Some((lo, hi))
    }
}
