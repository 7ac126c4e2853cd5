//! End-to-end checks over the whole generation pipeline.

use std::collections::VecDeque;

use island_mapgen::island::IslandShapeKind;
use island_mapgen::mesh::DualMesh;
use island_mapgen::{generate_map, GenerationConfig, MapError};

const SEEDS: [u64; 4] = [1, 42, 777, 12345];

fn small_config(seed: u64, shape: IslandShapeKind) -> GenerationConfig {
    GenerationConfig {
        num_points: 400,
        island_shape: shape,
        ..GenerationConfig::with_seed(seed)
    }
}

/// Ocean recomputed from scratch: water polygons reachable from a border
/// polygon through water neighbors.
fn brute_force_ocean(mesh: &DualMesh) -> Vec<bool> {
    let mut ocean = vec![false; mesh.centers.len()];
    let mut queue = VecDeque::new();
    for center in mesh.centers.iter().filter(|c| c.border) {
        ocean[center.index] = true;
        queue.push_back(center.index);
    }
    while let Some(p) = queue.pop_front() {
        for &r in &mesh.centers[p].neighbors {
            if mesh.centers[r].water && !ocean[r] {
                ocean[r] = true;
                queue.push_back(r);
            }
        }
    }
    ocean
}

#[test]
fn test_meshes_are_consistent() {
    for seed in SEEDS {
        let mesh = generate_map(&small_config(seed, IslandShapeKind::Radial)).unwrap();
        assert_eq!(mesh.centers.len(), 400);
        mesh.validate().unwrap();

        for corner in &mesh.corners {
            assert!(!corner.adjacent.contains(&corner.index));
            if corner.border {
                assert!(mesh.bounds.is_on_border(&corner.position));
            }
        }
    }
}

#[test]
fn test_border_is_ocean_at_sea_level() {
    for seed in SEEDS {
        let mesh = generate_map(&small_config(seed, IslandShapeKind::Radial)).unwrap();

        for corner in mesh.border_corners() {
            assert_eq!(corner.elevation, 0.0);
            assert!(corner.water);
        }
        for center in mesh.centers.iter().filter(|c| c.border) {
            assert!(center.ocean && center.water);
        }
    }
}

#[test]
fn test_ocean_matches_connectivity() {
    for shape in [IslandShapeKind::Radial, IslandShapeKind::Perlin, IslandShapeKind::Blob] {
        for seed in SEEDS {
            let mesh = generate_map(&small_config(seed, shape)).unwrap();
            let expected = brute_force_ocean(&mesh);
            for center in &mesh.centers {
                assert_eq!(center.ocean, expected[center.index], "seed {} center {}", seed, center.index);
                if center.ocean {
                    assert!(center.water);
                }
            }
        }
    }
}

#[test]
fn test_elevations_are_normalized() {
    for seed in SEEDS {
        let mesh = generate_map(&small_config(seed, IslandShapeKind::Radial)).unwrap();

        for corner in &mesh.corners {
            assert!((0.0..=1.0).contains(&corner.elevation), "corner {} at {}", corner.index, corner.elevation);
            if corner.ocean || corner.coast {
                assert_eq!(corner.elevation, 0.0);
            }
        }
        for center in &mesh.centers {
            assert!((0.0..=1.0).contains(&center.elevation));
        }
    }
}

#[test]
fn test_radial_island_has_land_and_coast() {
    for seed in SEEDS {
        let mesh = generate_map(&small_config(seed, IslandShapeKind::Radial)).unwrap();
        assert!(mesh.centers.iter().any(|c| !c.water), "seed {} has no land", seed);
        assert!(mesh.centers.iter().any(|c| c.coast), "seed {} has no coast", seed);
    }
}

#[test]
fn test_square_island_is_all_land_inside() {
    let mesh = generate_map(&small_config(3, IslandShapeKind::Square)).unwrap();
    for center in mesh.centers.iter().filter(|c| !c.border) {
        assert!(!center.ocean);
    }
}

#[test]
fn test_drainage_reaches_watershed_roots() {
    let mesh = generate_map(&small_config(42, IslandShapeKind::Radial)).unwrap();

    for corner in &mesh.corners {
        if let Some(d) = corner.downslope {
            assert!(corner.adjacent.contains(&d));
            assert!(mesh.corners[d].elevation <= corner.elevation);
        }
        assert!(corner.watershed.is_some());
    }

    let counted: i32 = mesh.corners.iter().map(|c| c.watershed_size).sum();
    assert_eq!(counted as usize, mesh.corners.len());
}

#[test]
fn test_same_seed_same_map() {
    let config = small_config(99, IslandShapeKind::Perlin);
    let a = generate_map(&config).unwrap();
    let b = generate_map(&config).unwrap();

    let summary = |m: &DualMesh| -> Vec<(bool, bool, bool, u64)> {
        m.centers.iter().map(|c| (c.water, c.ocean, c.coast, c.elevation.to_bits())).collect()
    };
    assert_eq!(summary(&a), summary(&b));
    assert_eq!(a.corners.len(), b.corners.len());
}

#[test]
fn test_invalid_configs_fail_fast() {
    let zero_width = GenerationConfig { width: 0.0, ..Default::default() };
    assert!(matches!(generate_map(&zero_width), Err(MapError::InvalidDimensions { .. })));

    let bad_threshold = GenerationConfig { lake_threshold: 0.0, ..Default::default() };
    assert!(matches!(generate_map(&bad_threshold), Err(MapError::InvalidLakeThreshold(_))));
}

#[test]
fn test_tiny_inputs_do_not_panic() {
    for num_points in [1, 2, 3] {
        let config = GenerationConfig { num_points, ..GenerationConfig::with_seed(5) };
        let mesh = generate_map(&config).unwrap();
        assert_eq!(mesh.centers.len(), num_points);
        mesh.validate().unwrap();
    }
}
