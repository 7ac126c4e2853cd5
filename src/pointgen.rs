//! Point generation and Lloyd relaxation.

use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::geometry::{BoundingBox, Point};
use crate::graph::build_dual_mesh;
use crate::subdivision::Subdivision;

/// Configuration for point generation.
#[derive(Debug, Clone)]
pub struct PointGeneratorConfig {
    /// Bounding box for the map.
    pub bounds: BoundingBox,
    /// Number of points to generate.
    pub num_points: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Number of Lloyd relaxation iterations.
    pub lloyd_iterations: u32,
}

impl Default for PointGeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::from_size(1000.0, 1000.0),
            num_points: 1000,
            seed: 12345,
            lloyd_iterations: 2,
        }
    }
}

/// Generate random points within the bounding box.
pub fn generate_random_points(config: &PointGeneratorConfig) -> Vec<Point> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    let bounds = &config.bounds;

    let mut points = Vec::with_capacity(config.num_points);
    for _ in 0..config.num_points {
        let x = rng.gen_range(bounds.min.x..bounds.max.x);
        let y = rng.gen_range(bounds.min.y..bounds.max.y);
        points.push(Point::new(x, y));
    }

    points
}

/// Perform one iteration of Lloyd relaxation.
/// Returns the maximum displacement of any point.
///
/// Each site moves to the average of its clipped Voronoi cell's vertices,
/// which approximates the cell centroid well enough to even out spacing.
fn lloyd_iteration(points: &mut [Point], bounds: &BoundingBox) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let subdivision = Subdivision::voronoi(points.to_vec(), bounds);
    let mesh = build_dual_mesh(&subdivision, bounds);

    let mut max_displacement = 0.0f64;
    for center in &mesh.centers {
        if center.corners.is_empty() {
            continue;
        }

        let sum = center.corners
            .iter()
            .fold(Point::ZERO, |acc, &c| acc + mesh.corners[c].position);
        let average = sum / center.corners.len() as f64;

        let old_pos = points[center.index];
        max_displacement = max_displacement.max(old_pos.distance(&average));
        points[center.index] = average;
    }

    max_displacement
}

/// Apply Lloyd relaxation to improve point distribution.
pub fn lloyd_relaxation(points: &mut [Point], bounds: &BoundingBox, iterations: u32) {
    for iteration in 0..iterations {
        let displacement = lloyd_iteration(points, bounds);
        tracing::trace!(
            target: "mapgen::pointgen",
            iteration,
            displacement,
            "pointgen.lloyd"
        );
    }
}

/// Generate points and apply Lloyd relaxation.
pub fn generate_relaxed_points(config: &PointGeneratorConfig) -> Vec<Point> {
    let mut points = generate_random_points(config);
    lloyd_relaxation(&mut points, &config.bounds, config.lloyd_iterations);

    tracing::debug!(
        target: "mapgen::pointgen",
        points = points.len(),
        seed = config.seed,
        iterations = config.lloyd_iterations,
        "pointgen.generated"
    );

    points
}
