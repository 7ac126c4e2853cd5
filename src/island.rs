//! Island shape predicates.
//!
//! A shape decides, for a point normalized to roughly [-1, 1]², whether it
//! lies inside the island. Shapes draw any random parameters once at
//! construction; evaluation is deterministic afterwards.

use std::f64::consts::TAU;

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Decides whether a normalized point is land.
pub trait IslandShape: Send + Sync {
    fn is_inside(&self, point: Point) -> bool;
}

impl<F> IslandShape for F
where
    F: Fn(Point) -> bool + Send + Sync,
{
    fn is_inside(&self, point: Point) -> bool {
        self(point)
    }
}

/// Built-in island shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IslandShapeKind {
    /// Bumpy disc with one dip.
    #[default]
    Radial,
    /// Fractal Perlin noise fading towards the edges.
    Perlin,
    /// Everything is land; only the map border is water.
    Square,
    /// A fixed blob with two lakes for eyes.
    Blob,
}

impl std::str::FromStr for IslandShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radial" => Ok(Self::Radial),
            "perlin" => Ok(Self::Perlin),
            "square" => Ok(Self::Square),
            "blob" => Ok(Self::Blob),
            other => Err(format!("unknown island shape '{}'", other)),
        }
    }
}

/// Radial island: a disc whose radius wobbles with angle, with one
/// wedge-shaped dip carved out of it.
#[derive(Debug, Clone)]
pub struct RadialShape {
    bumps: u32,
    start_angle: f64,
    dip_angle: f64,
    dip_width: f64,
}

impl RadialShape {
    /// 1.0 means no small islands; 2.0 leads to a lot.
    pub const ISLAND_FACTOR: f64 = 1.07;

    pub fn new(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self {
            bumps: rng.gen_range(1..=5),
            start_angle: rng.gen_range(0.0..TAU),
            dip_angle: rng.gen_range(0.0..TAU),
            dip_width: rng.gen_range(0.2..0.7),
        }
    }

    fn in_dip(&self, angle: f64) -> bool {
        let delta = angle - self.dip_angle;
        delta.abs() < self.dip_width
            || (delta + TAU).abs() < self.dip_width
            || (delta - TAU).abs() < self.dip_width
    }
}

impl IslandShape for RadialShape {
    fn is_inside(&self, point: Point) -> bool {
        let angle = point.y.atan2(point.x);
        let length = 0.5 * (point.x.abs().max(point.y.abs()) + point.length());
        let bumps = f64::from(self.bumps);

        let (r1, r2) = if self.in_dip(angle) {
            (0.2, 0.2)
        } else {
            (
                0.5 + 0.40 * (self.start_angle + bumps * angle + ((bumps + 3.0) * angle).cos()).sin(),
                0.7 - 0.20 * (self.start_angle + bumps * angle - ((bumps + 2.0) * angle).sin()).sin(),
            )
        };

        length < r1 || (length > r1 * Self::ISLAND_FACTOR && length < r2)
    }
}

/// Noise island: land where fractal noise beats a threshold rising with
/// distance from the center.
pub struct PerlinShape {
    fbm: Fbm<Perlin>,
}

impl PerlinShape {
    pub fn new(seed: u64) -> Self {
        let fbm = Fbm::<Perlin>::new(seed as u32)
            .set_octaves(6)
            .set_frequency(2.0)
            .set_persistence(0.5);
        Self { fbm }
    }
}

impl IslandShape for PerlinShape {
    fn is_inside(&self, point: Point) -> bool {
        let c = ((self.fbm.get([point.x, point.y]) + 1.0) * 0.5).clamp(0.0, 1.0);
        let length_sq = point.x * point.x + point.y * point.y;
        c > 0.3 + 0.3 * length_sq
    }
}

/// Everything is land.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareShape;

impl IslandShape for SquareShape {
    fn is_inside(&self, _point: Point) -> bool {
        true
    }
}

/// Fixed blob with two small lakes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobShape;

impl IslandShape for BlobShape {
    fn is_inside(&self, point: Point) -> bool {
        let eye_y = point.y / 2.0 + 0.2;
        let eye1 = Point::new(point.x - 0.2, eye_y).length() < 0.05;
        let eye2 = Point::new(point.x + 0.2, eye_y).length() < 0.05;
        let body = point.length() < 0.8 - 0.18 * (5.0 * point.y.atan2(point.x)).sin();
        body && !eye1 && !eye2
    }
}

/// Create a shape based on its kind. Random parameters come from `seed`.
pub fn create_shape(kind: IslandShapeKind, seed: u64) -> Box<dyn IslandShape> {
    match kind {
        IslandShapeKind::Radial => Box::new(RadialShape::new(seed)),
        IslandShapeKind::Perlin => Box::new(PerlinShape::new(seed)),
        IslandShapeKind::Square => Box::new(SquareShape),
        IslandShapeKind::Blob => Box::new(BlobShape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn grid() -> impl Iterator<Item = Point> {
        (0..=20).flat_map(|i| {
            (0..=20).map(move |j| Point::new(i as f64 / 10.0 - 1.0, j as f64 / 10.0 - 1.0))
        })
    }

    #[test]
    fn test_radial_parameters_in_range() {
        for seed in 0..50 {
            let shape = RadialShape::new(seed);
            assert!((1..=5).contains(&shape.bumps));
            assert!((0.0..TAU).contains(&shape.start_angle));
            assert!((0.0..TAU).contains(&shape.dip_angle));
            assert!((0.2..0.7).contains(&shape.dip_width));
        }
    }

    #[test]
    fn test_radial_is_deterministic() {
        let a = RadialShape::new(7);
        let b = RadialShape::new(7);
        for p in grid() {
            assert_eq!(a.is_inside(p), b.is_inside(p));
        }
    }

    #[test]
    fn test_radial_corners_are_outside() {
        for seed in 0..20 {
            let shape = RadialShape::new(seed);
            // length = 0.5 * (1 + sqrt 2) > 0.9 = max r2
            for p in [Point::new(1.0, 1.0), Point::new(-1.0, 1.0), Point::new(1.0, -1.0), Point::new(-1.0, -1.0)] {
                assert!(!shape.is_inside(p));
            }
        }
    }

    #[test]
    fn test_radial_dip_wraps_around() {
        let shape = RadialShape {
            bumps: 1,
            start_angle: 0.0,
            dip_angle: TAU - 0.1,
            dip_width: 0.3,
        };
        // Angle 0.1 is 0.2 away from the dip across the 0/2π seam
        assert!(shape.in_dip(0.1));
        assert!(!shape.in_dip(PI / 2.0));
        // Inside the dip only the innermost 0.2 is land
        assert!(shape.is_inside(Point::new(0.1, 0.0)));
        assert!(!shape.is_inside(Point::new(0.3, 0.0)));
    }

    #[test]
    fn test_square_and_blob() {
        assert!(SquareShape.is_inside(Point::new(1.0, 1.0)));
        assert!(BlobShape.is_inside(Point::new(0.0, 0.0)));
        assert!(!BlobShape.is_inside(Point::new(0.95, 0.95)));
        // One eye sits at (-0.2, -0.4)
        assert!(!BlobShape.is_inside(Point::new(-0.2, -0.4)));
    }

    #[test]
    fn test_perlin_edges_mostly_water() {
        let shape = PerlinShape::new(3);
        let corners_inside = [Point::new(1.0, 1.0), Point::new(-1.0, -1.0)]
            .into_iter()
            .filter(|&p| shape.is_inside(p))
            .count();
        assert_eq!(corners_inside, 0);
    }

    #[test]
    fn test_closures_are_shapes() {
        let upper_half = |p: Point| p.y > 0.0;
        let shape: &dyn IslandShape = &upper_half;
        assert!(shape.is_inside(Point::new(0.0, 0.5)));
        assert!(!shape.is_inside(Point::new(0.0, -0.5)));
    }

    #[test]
    fn test_shape_kind_from_str() {
        assert_eq!("Blob".parse::<IslandShapeKind>(), Ok(IslandShapeKind::Blob));
        assert!("hexagon".parse::<IslandShapeKind>().is_err());
    }
}
