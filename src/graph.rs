//! Build the dual graph (Voronoi/Delaunay) from raw subdivision output.
//!
//! This is the critical step that canonicalizes raw edges, which repeat
//! each Voronoi vertex once per incident edge, into our Arena-based
//! DualMesh structure.

use std::collections::HashMap;

use crate::geometry::{BoundingBox, Point};
use crate::mesh::{Center, Corner, DualMesh, Edge};
use crate::subdivision::Subdivision;

/// Squared distance under which two Voronoi points are the same Corner.
pub const CORNER_MERGE_DISTANCE_SQ: f64 = 1e-6;

/// Build a DualMesh from subdivision output.
pub fn build_dual_mesh(subdivision: &Subdivision, bounds: &BoundingBox) -> DualMesh {
    let mut mesh = DualMesh::new(*bounds);

    // Step 1: Create Centers (one per input point)
    let mut center_lookup: HashMap<(u64, u64), usize> = HashMap::with_capacity(subdivision.points.len());
    for (i, point) in subdivision.points.iter().enumerate() {
        mesh.centers.push(Center::new(i, *point));
        center_lookup.insert(point.key(), i);
    }

    // Step 2: One Edge per raw edge, canonicalizing corners as we go
    let mut corner_map = CornerMap::default();
    for raw in &subdivision.edges {
        let edge_index = mesh.edges.len();
        let mut edge = Edge::new(edge_index);

        edge.v0 = raw.v0.map(|p| corner_map.resolve(&mut mesh, p));
        edge.v1 = raw.v1.map(|p| corner_map.resolve(&mut mesh, p));
        edge.d0 = raw.d0.and_then(|p| center_lookup.get(&p.key()).copied());
        edge.d1 = raw.d1.and_then(|p| center_lookup.get(&p.key()).copied());

        if let (Some(v0), Some(v1)) = (edge.v0, edge.v1) {
            let p0 = mesh.corners[v0].position;
            let p1 = mesh.corners[v1].position;
            edge.midpoint = Some(p0.lerp(&p1, 0.5));
        }

        link_edge(&mut mesh, &edge);
        mesh.edges.push(edge);
    }

    tracing::debug!(
        target: "mapgen::graph",
        centers = mesh.centers.len(),
        corners = mesh.corners.len(),
        edges = mesh.edges.len(),
        border_corners = mesh.border_corners().count(),
        "graph.built"
    );

    #[cfg(debug_assertions)]
    if let Err(e) = mesh.validate() {
        tracing::error!(target: "mapgen::graph", error = %e, "graph.invalid");
    }

    mesh
}

/// Register an edge on every endpoint it touches.
fn link_edge(mesh: &mut DualMesh, edge: &Edge) {
    let centers = [edge.d0, edge.d1];
    let corners = [edge.v0, edge.v1];

    // Centers point to edges. Corners point to edges.
    for d in centers.into_iter().flatten() {
        push_unique(&mut mesh.centers[d].borders, edge.index);
    }
    for v in corners.into_iter().flatten() {
        push_unique(&mut mesh.corners[v].protrudes, edge.index);
    }

    // Centers point to centers.
    if let (Some(d0), Some(d1)) = (edge.d0, edge.d1) {
        if d0 != d1 {
            push_unique(&mut mesh.centers[d0].neighbors, d1);
            push_unique(&mut mesh.centers[d1].neighbors, d0);
        }
    }

    // Corners point to corners. A collapsed segment adds nothing.
    if let (Some(v0), Some(v1)) = (edge.v0, edge.v1) {
        if v0 != v1 {
            push_unique(&mut mesh.corners[v0].adjacent, v1);
            push_unique(&mut mesh.corners[v1].adjacent, v0);
        }
    }

    // Centers point to corners, corners point to centers.
    for d in centers.into_iter().flatten() {
        for v in corners.into_iter().flatten() {
            push_unique(&mut mesh.centers[d].corners, v);
            push_unique(&mut mesh.corners[v].touches, d);
        }
    }
}

#[inline]
fn push_unique(list: &mut Vec<usize>, item: usize) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Corners bucketed by `floor(x)` so that near-duplicate Voronoi points
/// only need to be compared against their neighbors.
#[derive(Debug, Default)]
struct CornerMap {
    buckets: HashMap<i64, Vec<usize>>,
}

impl CornerMap {
    /// Find the Corner at `point`, creating it if none is within merge
    /// distance.
    fn resolve(&mut self, mesh: &mut DualMesh, point: Point) -> usize {
        let key = point.x.floor() as i64;

        for bucket in key.saturating_sub(1)..=key.saturating_add(1) {
            if let Some(members) = self.buckets.get(&bucket) {
                let found = members
                    .iter()
                    .copied()
                    .find(|&c| mesh.corners[c].position.distance_sq(&point) < CORNER_MERGE_DISTANCE_SQ);
                if let Some(existing) = found {
                    return existing;
                }
            }
        }

        let index = mesh.corners.len();
        let mut corner = Corner::new(index, point);
        corner.border = mesh.bounds.is_on_border(&point);
        mesh.corners.push(corner);
        self.buckets.entry(key).or_default().push(index);
        index
    }
}
