//! Polygonal Island Map Generator
//!
//! Based on the algorithm by Amit Patel (Red Blob Games):
//! http://www-cs-students.stanford.edu/~amitp/game-programming/polygon-map-generation/
//!
//! This implementation uses:
//! - Arena-based data structures (no Rc<RefCell<T>>)
//! - Voronoi/Delaunay dual graph system
//! - Passes that take the mesh by value and hand it back

pub mod geometry;
pub mod error;
pub mod mesh;
pub mod subdivision;
pub mod pointgen;
pub mod graph;
pub mod island;
pub mod elevation;
pub mod classify;
pub mod drainage;
pub mod config;

use classify::{assign_coast, classify_water};
use drainage::{calculate_downslopes, calculate_watersheds};
use elevation::{assign_corner_elevations, assign_polygon_elevations, redistribute_elevations};
use graph::build_dual_mesh;
use island::{create_shape, IslandShape};
use mesh::DualMesh;
use subdivision::Subdivision;

pub use config::GenerationConfig;
pub use error::{MapError, Result};

/// Generate a complete map from a configuration.
///
/// The configuration is validated before any work is done.
pub fn generate_map(config: &GenerationConfig) -> Result<DualMesh> {
    config.validate()?;

    let shape = create_shape(config.island_shape, config.seed);
    let mesh = generate_map_with_shape(config, shape.as_ref());

    tracing::info!(
        target: "mapgen",
        seed = config.seed,
        shape = ?config.island_shape,
        centers = mesh.centers.len(),
        corners = mesh.corners.len(),
        edges = mesh.edges.len(),
        land = mesh.centers.iter().filter(|c| !c.water).count(),
        "map.generated"
    );

    Ok(mesh)
}

/// Run the pipeline with a caller-supplied island shape. `island_shape`
/// in `config` is ignored and nothing is validated.
pub fn generate_map_with_shape(config: &GenerationConfig, shape: &dyn IslandShape) -> DualMesh {
    let bounds = config.bounds();

    // Step 1: Generate and relax points
    let points = pointgen::generate_relaxed_points(&config.point_config());

    // Step 2: Build dual graph
    let subdivision = Subdivision::voronoi(points, &bounds);
    let mesh = build_dual_mesh(&subdivision, &bounds);

    // Step 3: Elevation and water from the island shape
    let mesh = assign_corner_elevations(mesh, shape);

    // Step 4: Ocean, lakes and coast
    let mesh = classify_water(mesh, config.lake_threshold);
    let mesh = assign_coast(mesh);

    // Step 5: Normalize elevations
    let mesh = redistribute_elevations(mesh);
    let mesh = assign_polygon_elevations(mesh);

    // Step 6: Drainage
    let mesh = calculate_downslopes(mesh);
    calculate_watersheds(mesh)
}

/// Statistics report for generated map.
#[derive(Debug, Clone)]
pub struct MapStats {
    pub total_regions: usize,
    pub land_regions: usize,
    pub ocean_regions: usize,
    pub lake_regions: usize,
    pub coast_regions: usize,
    pub land_percentage: f64,
    pub total_corners: usize,
    pub border_corners: usize,
    pub total_edges: usize,
    pub watersheds: usize,
    pub elevation_stats: ElevationStats,
}

#[derive(Debug, Clone, Default)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub plains_percentage: f64,    // elevation < 0.3
    pub hills_percentage: f64,     // 0.3 <= elevation < 0.6
    pub mountains_percentage: f64, // elevation >= 0.6
}

/// Generate statistics report for a mesh.
pub fn generate_map_stats(mesh: &DualMesh) -> MapStats {
    let total_regions = mesh.centers.len();
    let land_regions = mesh.centers.iter().filter(|c| !c.water).count();
    let ocean_regions = mesh.centers.iter().filter(|c| c.ocean).count();
    let lake_regions = mesh.centers.iter().filter(|c| c.water && !c.ocean).count();
    let coast_regions = mesh.centers.iter().filter(|c| c.coast).count();
    let land_percentage = if total_regions > 0 {
        (land_regions as f64 / total_regions as f64) * 100.0
    } else {
        0.0
    };

    let watersheds = mesh.corners
        .iter()
        .filter(|c| c.coast && c.watershed_size > 1)
        .count();

    // Elevation stats for land only
    let land_elevations: Vec<f64> = mesh.centers
        .iter()
        .filter(|c| !c.water && c.elevation.is_finite())
        .map(|c| c.elevation)
        .collect();

    let elevation_stats = if !land_elevations.is_empty() {
        let min = land_elevations.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = land_elevations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = land_elevations.iter().sum::<f64>() / land_elevations.len() as f64;

        let plains = land_elevations.iter().filter(|&&e| e < 0.3).count();
        let hills = land_elevations.iter().filter(|&&e| (0.3..0.6).contains(&e)).count();
        let mountains = land_elevations.iter().filter(|&&e| e >= 0.6).count();
        let total = land_elevations.len() as f64;

        ElevationStats {
            min,
            max,
            mean,
            plains_percentage: (plains as f64 / total) * 100.0,
            hills_percentage: (hills as f64 / total) * 100.0,
            mountains_percentage: (mountains as f64 / total) * 100.0,
        }
    } else {
        ElevationStats::default()
    };

    MapStats {
        total_regions,
        land_regions,
        ocean_regions,
        lake_regions,
        coast_regions,
        land_percentage,
        total_corners: mesh.corners.len(),
        border_corners: mesh.border_corners().count(),
        total_edges: mesh.edges.len(),
        watersheds,
        elevation_stats,
    }
}

/// Print map statistics report.
pub fn print_map_report(stats: &MapStats) {
    println!("\n=== Map Generation Report ===");
    println!("Regions: {} total", stats.total_regions);
    println!("  - Land: {} ({:.1}%)", stats.land_regions, stats.land_percentage);
    println!("  - Ocean: {}", stats.ocean_regions);
    println!("  - Lakes: {}", stats.lake_regions);
    println!("  - Coast: {}", stats.coast_regions);
    println!("Corners: {} (border: {})", stats.total_corners, stats.border_corners);
    println!("Edges: {}", stats.total_edges);
    println!("Coastal watersheds: {}", stats.watersheds);

    println!("\nElevation Distribution (land only):");
    println!("  - Range: {:.3} to {:.3} (mean: {:.3})",
        stats.elevation_stats.min, stats.elevation_stats.max, stats.elevation_stats.mean);
    println!("  - Plains (<0.3): {:.1}%", stats.elevation_stats.plains_percentage);
    println!("  - Hills (0.3-0.6): {:.1}%", stats.elevation_stats.hills_percentage);
    println!("  - Mountains (>0.6): {:.1}%", stats.elevation_stats.mountains_percentage);
    println!("=============================\n");
}
