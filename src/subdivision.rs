//! Planar subdivision input: sample points plus raw dual edges.
//!
//! [`Subdivision`] is the only thing the graph builder consumes, so any
//! solver can feed it. [`Subdivision::voronoi`] is the bundled solver: it
//! triangulates with delaunator and clips every Voronoi edge to the map
//! rectangle, so clipped endpoints land exactly on the boundary.

use crate::geometry::{circumcenter, BoundingBox, Point};

/// One edge of the subdivision, carrying both of its dual endpoints.
///
/// Any endpoint may be missing: Delaunay points outside the sample set and
/// Voronoi points cut away by the map boundary are both legal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawEdge {
    /// Delaunay side (sample points).
    pub d0: Option<Point>,
    pub d1: Option<Point>,
    /// Voronoi side (cell vertices).
    pub v0: Option<Point>,
    pub v1: Option<Point>,
}

impl RawEdge {
    pub fn new(d0: Option<Point>, d1: Option<Point>, v0: Option<Point>, v1: Option<Point>) -> Self {
        Self { d0, d1, v0, v1 }
    }
}

/// Output of a subdivision solver.
#[derive(Debug, Clone, Default)]
pub struct Subdivision {
    /// Sample sites, already deduplicated.
    pub points: Vec<Point>,
    pub edges: Vec<RawEdge>,
}

impl Subdivision {
    pub fn new(points: Vec<Point>, edges: Vec<RawEdge>) -> Self {
        Self { points, edges }
    }

    /// Compute the Voronoi diagram of `points`, clipped to `bounds`.
    ///
    /// Yields one raw edge per Delaunay edge. Fewer than three points, or a
    /// fully collinear set, yields no edges.
    pub fn voronoi(points: Vec<Point>, bounds: &BoundingBox) -> Self {
        if points.len() < 3 {
            return Self::new(points, Vec::new());
        }

        let delaunator_points: Vec<delaunator::Point> = points
            .iter()
            .map(|&p| p.into())
            .collect();

        let triangulation = delaunator::triangulate(&delaunator_points);
        if triangulation.triangles.is_empty() {
            tracing::debug!(
                target: "mapgen::subdivision",
                points = points.len(),
                "subdivision.degenerate"
            );
            return Self::new(points, Vec::new());
        }

        let triangles = &triangulation.triangles;
        let circumcenters: Vec<Point> = triangles
            .chunks_exact(3)
            .map(|t| circumcenter(&points[t[0]], &points[t[1]], &points[t[2]]))
            .collect();

        let mut edges = Vec::with_capacity(triangles.len() / 2 + triangulation.hull.len());
        let mut hidden = 0usize;

        for e in 0..triangles.len() {
            let opposite = triangulation.halfedges[e];
            // Each interior Delaunay edge has two halfedges; take the lower one
            if opposite != delaunator::EMPTY && opposite < e {
                continue;
            }

            let a = points[triangles[e]];
            let b = points[triangles[next_halfedge(e)]];
            let c0 = circumcenters[e / 3];

            let (v0, v1) = if opposite != delaunator::EMPTY {
                clip_segment(bounds, c0, circumcenters[opposite / 3])
            } else {
                // Hull edge: the Voronoi edge is a ray leaving the hull
                let third = points[triangles[prev_halfedge(e)]];
                clip_ray(bounds, c0, outward_normal(a, b, third))
            };

            if v0.is_none() {
                hidden += 1;
            }
            edges.push(RawEdge::new(Some(a), Some(b), v0, v1));
        }

        tracing::debug!(
            target: "mapgen::subdivision",
            points = points.len(),
            triangles = circumcenters.len(),
            edges = edges.len(),
            hidden,
            "subdivision.voronoi"
        );

        Self::new(points, edges)
    }
}

/// Perpendicular of `a -> b` pointing away from `third`.
fn outward_normal(a: Point, b: Point, third: Point) -> Point {
    let edge = b - a;
    let normal = Point::new(-edge.y, edge.x);
    let inward = third - a;
    if normal.x * inward.x + normal.y * inward.y > 0.0 {
        normal * -1.0
    } else {
        normal
    }
}

fn clip_segment(bounds: &BoundingBox, p: Point, q: Point) -> (Option<Point>, Option<Point>) {
    let dir = q - p;
    match bounds.clip_line(p, dir, 0.0, 1.0) {
        None => (None, None),
        Some((lo, hi)) => {
            let start = if lo > 0.0 { bounds.project_to_border(&(p + dir * lo)) } else { p };
            let end = if hi < 1.0 { bounds.project_to_border(&(p + dir * hi)) } else { q };
            (Some(start), Some(end))
        }
    }
}

fn clip_ray(bounds: &BoundingBox, origin: Point, dir: Point) -> (Option<Point>, Option<Point>) {
    if dir.x == 0.0 && dir.y == 0.0 {
        return (None, None);
    }
    match bounds.clip_line(origin, dir, 0.0, f64::INFINITY) {
        None => (None, None),
        Some((lo, hi)) => {
            let start = if lo > 0.0 { bounds.project_to_border(&(origin + dir * lo)) } else { origin };
            let end = bounds.project_to_border(&(origin + dir * hi));
            (Some(start), Some(end))
        }
    }
}

// === Halfedge navigation helpers ===

#[inline]
fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 { e - 2 } else { e + 1 }
}

#[inline]
fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 { e + 2 } else { e - 1 }
}

/// Hand-built subdivisions shared by unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Four cells in a 100x100 map meeting at (50, 50). The single interior
    /// Voronoi vertex is joined to four border vertices at the edge midpoints.
    pub(crate) fn four_cell_square() -> (Subdivision, BoundingBox) {
        let sw = Point::new(25.0, 25.0);
        let se = Point::new(75.0, 25.0);
        let ne = Point::new(75.0, 75.0);
        let nw = Point::new(25.0, 75.0);
        let hub = Point::new(50.0, 50.0);

        let edges = vec![
            RawEdge::new(Some(sw), Some(se), Some(hub), Some(Point::new(50.0, 0.0))),
            RawEdge::new(Some(se), Some(ne), Some(hub), Some(Point::new(100.0, 50.0))),
            RawEdge::new(Some(ne), Some(nw), Some(hub), Some(Point::new(50.0, 100.0))),
            RawEdge::new(Some(nw), Some(sw), Some(hub), Some(Point::new(0.0, 50.0))),
        ];
        (Subdivision::new(vec![sw, se, ne, nw], edges), BoundingBox::from_size(100.0, 100.0))
    }
}
