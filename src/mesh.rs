//! Core data structures for the dual graph system.
//!
//! This module implements the Arena pattern with index-based references
//! to avoid Rc<RefCell<T>> and handle circular references cleanly.
//!
//! The dual graph consists of:
//! - **Center** (Polygon): Voronoi cell, corresponds to an input sample point
//! - **Corner**: Voronoi vertex, corresponds to a Delaunay triangle
//! - **Edge**: Connects two Centers (Delaunay edge) and two Corners (Voronoi edge)
//!
//! Entities are only created by [`crate::graph::build_dual_mesh`]. Every later
//! pass mutates attribute fields in place and never adds or removes entities.

use std::collections::HashSet;

use crate::error::{MapError, Result};
use crate::geometry::{BoundingBox, Point};

/// A Voronoi polygon center (Polygon).
/// Corresponds to one of the input sample points.
#[derive(Debug, Clone, Default)]
pub struct Center {
    /// Index in the centers array.
    pub index: usize,
    /// Position of the sample point.
    pub position: Point,

    // === Topology (indices) ===
    /// Neighboring Center indices (share an edge).
    pub neighbors: Vec<usize>,
    /// Border Edge indices.
    pub borders: Vec<usize>,
    /// Corner indices (vertices of the Voronoi polygon).
    pub corners: Vec<usize>,

    // === Terrain properties ===
    /// True if this is water (ocean or lake).
    pub water: bool,
    /// True if this is ocean (water connected to map boundary).
    pub ocean: bool,
    /// True if this is a coast (touches both ocean and land).
    pub coast: bool,
    /// True if this polygon touches the map boundary.
    pub border: bool,
    /// Elevation (0.0 = sea level, 1.0 = mountain peak).
    pub elevation: f64,
    /// Moisture (0.0 = dry, 1.0 = wet).
    pub moisture: f64,
}

impl Center {
    pub fn new(index: usize, position: Point) -> Self {
        Self {
            index,
            position,
            ..Default::default()
        }
    }
}

/// A Voronoi vertex (Corner).
#[derive(Debug, Clone, Default)]
pub struct Corner {
    /// Index in the corners array.
    pub index: usize,
    /// Position of the Voronoi vertex.
    pub position: Point,

    // === Topology (indices) ===
    /// Adjacent Corner indices (connected by Voronoi edges).
    pub adjacent: Vec<usize>,
    /// Edge indices that protrude from this corner.
    pub protrudes: Vec<usize>,
    /// Center indices that this corner touches.
    pub touches: Vec<usize>,

    // === Terrain properties ===
    /// True if this corner is water.
    pub water: bool,
    /// True if this corner is in the ocean.
    pub ocean: bool,
    /// True if this is a coast corner.
    pub coast: bool,
    /// Elevation at this corner. Infinite if unreachable from the border.
    pub elevation: f64,
    /// Moisture at this corner.
    pub moisture: f64,
    /// River volume flowing through this corner (0 = no river).
    pub river: i32,
    /// Most downhill adjacent corner, if any.
    pub downslope: Option<usize>,
    /// Coastal corner terminating this corner's drainage, if any.
    pub watershed: Option<usize>,
    /// Number of corners draining into this corner.
    pub watershed_size: i32,

    // === Boundary flags ===
    /// True if this corner lies exactly on the map boundary.
    pub border: bool,
}

impl Corner {
    pub fn new(index: usize, position: Point) -> Self {
        Self {
            index,
            position,
            ..Default::default()
        }
    }
}

/// An edge in the dual graph.
/// Connects up to two Centers (Delaunay edge) and up to two Corners (Voronoi edge).
#[derive(Debug, Clone, Default)]
pub struct Edge {
    /// Index in the edges array.
    pub index: usize,

    // === Delaunay edge (connects two Centers) ===
    pub d0: Option<usize>,
    pub d1: Option<usize>,

    // === Voronoi edge (connects two Corners) ===
    /// Absent when the Voronoi edge is cut by the map boundary.
    pub v0: Option<usize>,
    pub v1: Option<usize>,

    // === Properties ===
    /// Midpoint of `v0`..`v1`, present only if both corners are.
    pub midpoint: Option<Point>,
    /// River volume flowing along this edge.
    pub river: i32,
}

impl Edge {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }
}

/// The complete dual mesh structure holding all graph elements.
/// Uses Arena pattern - all references are usize indices into these vectors.
#[derive(Debug, Clone)]
pub struct DualMesh {
    /// Map rectangle the mesh was built against.
    pub bounds: BoundingBox,
    /// All Centers (Voronoi polygons).
    pub centers: Vec<Center>,
    /// All Corners (Voronoi vertices).
    pub corners: Vec<Corner>,
    /// All Edges.
    pub edges: Vec<Edge>,
}

impl DualMesh {
    /// Create a new empty dual mesh.
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            centers: Vec::new(),
            corners: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    // === Accessors ===

    #[inline]
    pub fn center(&self, index: usize) -> Option<&Center> {
        self.centers.get(index)
    }

    #[inline]
    pub fn corner(&self, index: usize) -> Option<&Corner> {
        self.corners.get(index)
    }

    /// Iterate over corners on the map boundary.
    pub fn border_corners(&self) -> impl Iterator<Item = &Corner> {
        self.corners.iter().filter(|c| c.border)
    }

    // === Validation ===

    /// Check that every cross-reference is in range and every adjacency list
    /// is free of duplicates.
    pub fn validate(&self) -> Result<()> {
        let num_centers = self.centers.len();
        let num_corners = self.corners.len();
        let num_edges = self.edges.len();

        for (i, center) in self.centers.iter().enumerate() {
            if center.index != i {
                return Err(invalid(format!("Center at {} has index {}", i, center.index)));
            }
            check_list("Center", i, "neighbor", &center.neighbors, num_centers)?;
            check_list("Center", i, "corner", &center.corners, num_corners)?;
            check_list("Center", i, "border", &center.borders, num_edges)?;
        }

        for (i, corner) in self.corners.iter().enumerate() {
            if corner.index != i {
                return Err(invalid(format!("Corner at {} has index {}", i, corner.index)));
            }
            check_list("Corner", i, "adjacent", &corner.adjacent, num_corners)?;
            check_list("Corner", i, "touches", &corner.touches, num_centers)?;
            check_list("Corner", i, "protrudes", &corner.protrudes, num_edges)?;
            for (name, link) in [("downslope", corner.downslope), ("watershed", corner.watershed)] {
                if link.is_some_and(|l| l >= num_corners) {
                    return Err(invalid(format!("Corner {} has invalid {} index", i, name)));
                }
            }
        }

        for edge in &self.edges {
            for (name, d) in [("d0", edge.d0), ("d1", edge.d1)] {
                if d.is_some_and(|d| d >= num_centers) {
                    return Err(invalid(format!("Edge {} has invalid {} index", edge.index, name)));
                }
            }
            for (name, v) in [("v0", edge.v0), ("v1", edge.v1)] {
                if v.is_some_and(|v| v >= num_corners) {
                    return Err(invalid(format!("Edge {} has invalid {} index", edge.index, name)));
                }
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> MapError {
    MapError::InvalidMesh(msg)
}

fn check_list(kind: &str, owner: usize, name: &str, list: &[usize], len: usize) -> Result<()> {
    let mut seen = HashSet::with_capacity(list.len());
    for &item in list {
        if item >= len {
            return Err(invalid(format!("{} {} has invalid {} index {}", kind, owner, name, item)));
        }
        if !seen.insert(item) {
            return Err(invalid(format!("{} {} lists {} {} twice", kind, owner, name, item)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicate_neighbor() {
        let mut mesh = DualMesh::new(BoundingBox::from_size(10.0, 10.0));
        mesh.centers.push(Center::new(0, Point::new(1.0, 1.0)));
        mesh.centers.push(Center::new(1, Point::new(2.0, 2.0)));
        mesh.centers[0].neighbors = vec![1, 1];

        assert!(matches!(mesh.validate(), Err(MapError::InvalidMesh(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_edge() {
        let mut mesh = DualMesh::new(BoundingBox::from_size(10.0, 10.0));
        let mut edge = Edge::new(0);
        edge.v0 = Some(3);
        mesh.edges.push(edge);

        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = DualMesh::new(BoundingBox::from_size(10.0, 10.0));
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
    }
}
