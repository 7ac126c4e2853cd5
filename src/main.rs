//! Polygonal Island Map Generator - Command Line
//!
//! Generates an island and prints a report of its regions and elevations.
//! Set `RUST_LOG=mapgen=debug` to follow each pipeline stage.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use island_mapgen::island::IslandShapeKind;
use island_mapgen::{generate_map, generate_map_stats, print_map_report, GenerationConfig};

/// Procedural island map generator.
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of Voronoi cells.
    #[arg(short, long)]
    points: Option<usize>,

    /// Map width.
    #[arg(long)]
    width: Option<f64>,

    /// Map height.
    #[arg(long)]
    height: Option<f64>,

    /// Fraction of water corners that makes a lake (0, 1].
    #[arg(long)]
    lake_threshold: Option<f64>,

    /// Lloyd relaxation iterations.
    #[arg(long)]
    lloyd_iterations: Option<u32>,

    /// Island shape: radial, perlin, square or blob.
    #[arg(long)]
    shape: Option<IslandShapeKind>,
}

impl Cli {
    fn into_config(self) -> Result<GenerationConfig, island_mapgen::MapError> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_toml_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(points) = self.points {
            config.num_points = points;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(threshold) = self.lake_threshold {
            config.lake_threshold = threshold;
        }
        if let Some(iterations) = self.lloyd_iterations {
            config.lloyd_iterations = iterations;
        }
        if let Some(shape) = self.shape {
            config.island_shape = shape;
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    let config = Cli::parse().into_config()?;

    println!("=== Polygonal Island Map Generator ===");
    println!(
        "Generating {} cells on a {}x{} map (seed {}, {:?} shape)...",
        config.num_points, config.width, config.height, config.seed, config.island_shape
    );

    let start = Instant::now();
    let mesh = generate_map(&config)?;
    println!("Done in {:.2?}", start.elapsed());

    print_map_report(&generate_map_stats(&mesh));
    Ok(())
}
