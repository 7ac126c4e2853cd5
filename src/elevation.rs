//! Elevation calculation for corners and centers.
//!
//! Corner elevation is the cheapest path cost from the map border, where a
//! step over land costs far more than a step touching water:
//! 1. The island shape decides which corners are water
//! 2. Border corners are seeded at 0 and relaxed inwards over a FIFO queue
//! 3. Land elevations are redistributed into [0, 1] by rank
//! 4. Centers take the mean of their corners
//!
//! Every pass takes the mesh by value and hands it back.

use std::collections::VecDeque;

use crate::island::IslandShape;
use crate::mesh::DualMesh;

/// Cost of any step that touches water.
pub const WATER_STEP: f64 = 0.01;
/// Extra cost of a step between two land corners.
pub const LAND_STEP: f64 = 1.0;
/// Shapes the redistribution curve; larger values flatten the lowlands.
pub const REDISTRIBUTION_SCALE: f64 = 1.1;

/// Mark corner water from the island shape and relax elevations inwards
/// from the map border.
///
/// Border corners end at 0. Every other reachable corner ends at the
/// cheapest path cost from the border, so each one has an adjacent corner
/// that is strictly lower. Corners the border cannot reach keep an infinite
/// elevation.
pub fn assign_corner_elevations(mut mesh: DualMesh, shape: &dyn IslandShape) -> DualMesh {
    let bounds = mesh.bounds;
    let mut queue = VecDeque::new();

    for corner in mesh.corners.iter_mut() {
        corner.water = !shape.is_inside(bounds.normalize(&corner.position));

        if corner.border {
            corner.elevation = 0.0;
            queue.push_back(corner.index);
        } else {
            corner.elevation = f64::INFINITY;
        }
    }

    // FIFO relaxation; a corner is requeued whenever it gets cheaper
    let mut relaxations = 0usize;
    while let Some(q) = queue.pop_front() {
        let elevation = mesh.corners[q].elevation;
        let water = mesh.corners[q].water;

        for i in 0..mesh.corners[q].adjacent.len() {
            let s = mesh.corners[q].adjacent[i];

            let mut new_elevation = elevation + WATER_STEP;
            if !water && !mesh.corners[s].water {
                new_elevation += LAND_STEP;
            }

            if new_elevation < mesh.corners[s].elevation {
                mesh.corners[s].elevation = new_elevation;
                queue.push_back(s);
                relaxations += 1;
            }
        }
    }

    let unreachable = mesh.corners.iter().filter(|c| !c.elevation.is_finite()).count();
    if unreachable > 0 {
        tracing::warn!(
            target: "mapgen::elevation",
            unreachable,
            "elevation.unreachable_corners"
        );
    }

    tracing::debug!(
        target: "mapgen::elevation",
        corners = mesh.corners.len(),
        water = mesh.corners.iter().filter(|c| c.water).count(),
        relaxations,
        "elevation.corners_assigned"
    );

    mesh
}

/// Rescale land corner elevations into [0, 1] by rank.
///
/// Land corners (neither ocean nor coast, finite elevation) sorted by
/// elevation get `x = sqrt(s) - sqrt(s * (1 - y))` for rank fraction `y`,
/// capped at 1, which leaves more low ground than high. Ocean and coast
/// corners go to 0. Unreachable corners keep their infinite elevation.
pub fn redistribute_elevations(mut mesh: DualMesh) -> DualMesh {
    let mut land: Vec<usize> = mesh.corners
        .iter()
        .filter(|c| !c.ocean && !c.coast && c.elevation.is_finite())
        .map(|c| c.index)
        .collect();

    land.sort_by(|&a, &b| mesh.corners[a].elevation.total_cmp(&mesh.corners[b].elevation));

    let n = land.len();
    for (rank, &c) in land.iter().enumerate() {
        let y = if n > 1 { rank as f64 / (n - 1) as f64 } else { 1.0 };
        let x = REDISTRIBUTION_SCALE.sqrt() - (REDISTRIBUTION_SCALE * (1.0 - y)).sqrt();
        mesh.corners[c].elevation = x.min(1.0);
    }

    for corner in mesh.corners.iter_mut() {
        if corner.ocean || corner.coast {
            corner.elevation = 0.0;
        }
    }

    mesh
}

/// Set each center's elevation to the mean of its corners.
pub fn assign_polygon_elevations(mut mesh: DualMesh) -> DualMesh {
    for i in 0..mesh.centers.len() {
        let corners = &mesh.centers[i].corners;

        let elevation = if corners.is_empty() {
            0.0
        } else {
            let sum: f64 = corners.iter().map(|&c| mesh.corners[c].elevation).sum();
            sum / corners.len() as f64
        };

        mesh.centers[i].elevation = elevation;
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Point};
    use crate::graph::build_dual_mesh;
    use crate::island::{RadialShape, SquareShape};
    use crate::mesh::Corner;
    use crate::pointgen::{PointGeneratorConfig, generate_relaxed_points};
    use crate::subdivision::{fixtures::four_cell_square, Subdivision};

    fn generated_mesh(seed: u64) -> DualMesh {
        let config = PointGeneratorConfig {
            num_points: 200,
            seed,
            lloyd_iterations: 2,
            ..Default::default()
        };
        let points = generate_relaxed_points(&config);
        build_dual_mesh(&Subdivision::voronoi(points, &config.bounds), &config.bounds)
    }

    #[test]
    fn test_square_scenario_all_land() {
        let (subdivision, bounds) = four_cell_square();
        let mesh = assign_corner_elevations(build_dual_mesh(&subdivision, &bounds), &SquareShape);

        let hub = &mesh.corners[0];
        assert!(!hub.border);
        assert!((hub.elevation - 1.01).abs() < 1e-12);
        for corner in mesh.corners.iter().skip(1) {
            assert!(corner.border);
            assert_eq!(corner.elevation, 0.0);
        }
    }

    #[test]
    fn test_square_scenario_all_water() {
        let (subdivision, bounds) = four_cell_square();
        let mesh = assign_corner_elevations(build_dual_mesh(&subdivision, &bounds), &|_: Point| false);

        assert!(mesh.corners.iter().all(|c| c.water));
        assert!((mesh.corners[0].elevation - WATER_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_border_corners_stay_at_zero() {
        let mesh = assign_corner_elevations(generated_mesh(1), &RadialShape::new(1));

        assert!(mesh.border_corners().count() > 0);
        for corner in mesh.border_corners() {
            assert_eq!(corner.elevation, 0.0);
        }
    }

    #[test]
    fn test_no_local_minima() {
        let mesh = assign_corner_elevations(generated_mesh(2), &RadialShape::new(2));

        for corner in mesh.corners.iter().filter(|c| !c.border) {
            assert!(corner.elevation.is_finite(), "corner {} unreachable", corner.index);
            let has_lower = corner.adjacent
                .iter()
                .any(|&a| mesh.corners[a].elevation < corner.elevation);
            assert!(has_lower, "corner {} is a local minimum", corner.index);
        }
    }

    #[test]
    fn test_elevation_matches_shortest_path() {
        // Brute-force Bellman-Ford over the same step costs
        let mesh = assign_corner_elevations(generated_mesh(3), &RadialShape::new(3));
        let mut expected: Vec<f64> = mesh.corners
            .iter()
            .map(|c| if c.border { 0.0 } else { f64::INFINITY })
            .collect();

        loop {
            let mut changed = false;
            for corner in &mesh.corners {
                for &a in &corner.adjacent {
                    let step = if corner.water || mesh.corners[a].water { WATER_STEP } else { WATER_STEP + LAND_STEP };
                    if expected[corner.index] + step < expected[a] - 1e-9 {
                        expected[a] = expected[corner.index] + step;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        for corner in &mesh.corners {
            assert!((corner.elevation - expected[corner.index]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_disconnected_corners_stay_infinite() {
        let mut mesh = DualMesh::new(BoundingBox::from_size(10.0, 10.0));
        let mut border = Corner::new(0, Point::new(0.0, 5.0));
        border.border = true;
        mesh.corners.push(border);
        let mut a = Corner::new(1, Point::new(4.0, 4.0));
        let mut b = Corner::new(2, Point::new(6.0, 6.0));
        a.adjacent.push(2);
        b.adjacent.push(1);
        mesh.corners.push(a);
        mesh.corners.push(b);

        let mesh = assign_corner_elevations(mesh, &SquareShape);
        assert_eq!(mesh.corners[0].elevation, 0.0);
        assert!(mesh.corners[1].elevation.is_infinite());
        assert!(mesh.corners[2].elevation.is_infinite());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let shape = RadialShape::new(4);
        let once = assign_corner_elevations(generated_mesh(4), &shape);
        let first: Vec<(bool, f64)> = once.corners.iter().map(|c| (c.water, c.elevation)).collect();

        let twice = assign_corner_elevations(once, &shape);
        let second: Vec<(bool, f64)> = twice.corners.iter().map(|c| (c.water, c.elevation)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_redistribution_preserves_order() {
        let mesh = assign_corner_elevations(generated_mesh(5), &RadialShape::new(5));
        let before: Vec<f64> = mesh.corners.iter().map(|c| c.elevation).collect();
        let mesh = redistribute_elevations(mesh);

        for a in &mesh.corners {
            assert!((0.0..=1.0).contains(&a.elevation));
            for b in &mesh.corners {
                if before[a.index] < before[b.index] {
                    assert!(a.elevation <= b.elevation);
                }
            }
        }
    }

    #[test]
    fn test_polygon_elevation_is_corner_mean() {
        let (subdivision, bounds) = four_cell_square();
        let mesh = assign_corner_elevations(build_dual_mesh(&subdivision, &bounds), &SquareShape);
        let mesh = assign_polygon_elevations(mesh);

        // Each cell touches the hub and two border corners
        for center in &mesh.centers {
            assert_eq!(center.corners.len(), 3);
            assert!((center.elevation - 1.01 / 3.0).abs() < 1e-12);
        }
    }
}
