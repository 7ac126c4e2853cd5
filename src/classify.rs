//! Ocean, lake, coast and land classification.
//!
//! Centers become water when enough of their corners are water. Water
//! connected to the map border through other water is ocean; the rest is
//! lake. Coast flags are derived afterwards by [`assign_coast`].

use std::collections::VecDeque;

use crate::mesh::DualMesh;

/// Default fraction of water corners that makes a center a lake.
pub const DEFAULT_LAKE_THRESHOLD: f64 = 0.3;

/// Classify every center as ocean, lake or land.
///
/// Pass 1 marks centers touching a border corner as border ocean (forcing
/// that corner to water) and sets `water` from the ratio of water corners.
/// Pass 2 floods ocean outwards from those border centers through water
/// neighbors. Center flags are reset first, so the result depends only on
/// the current corner water flags.
pub fn classify_water(mut mesh: DualMesh, lake_threshold: f64) -> DualMesh {
    let mut queue = VecDeque::new();

    for center in mesh.centers.iter_mut() {
        center.border = false;
        center.ocean = false;
        center.water = false;
    }

    // Pass 1: per-center aggregation and ocean seeding
    for i in 0..mesh.centers.len() {
        let mut num_water = 0usize;
        let mut touches_border = false;

        for j in 0..mesh.centers[i].corners.len() {
            let c = mesh.centers[i].corners[j];
            let corner = &mut mesh.corners[c];
            if corner.border {
                touches_border = true;
                corner.water = true;
            }
            if corner.water {
                num_water += 1;
            }
        }

        let center = &mut mesh.centers[i];
        if touches_border {
            center.border = true;
            center.ocean = true;
            queue.push_back(i);
        }

        let num_corners = center.corners.len();
        center.water = center.ocean
            || (num_corners > 0 && num_water as f64 >= num_corners as f64 * lake_threshold);
    }

    let seeds = queue.len();

    // Pass 2: flood fill ocean through water neighbors
    while let Some(p) = queue.pop_front() {
        for j in 0..mesh.centers[p].neighbors.len() {
            let r = mesh.centers[p].neighbors[j];
            if mesh.centers[r].water && !mesh.centers[r].ocean {
                mesh.centers[r].ocean = true;
                queue.push_back(r);
            }
        }
    }

    tracing::debug!(
        target: "mapgen::classify",
        seeds,
        ocean = mesh.centers.iter().filter(|c| c.ocean).count(),
        lakes = mesh.centers.iter().filter(|c| c.water && !c.ocean).count(),
        land = mesh.centers.iter().filter(|c| !c.water).count(),
        "classify.water"
    );

    mesh
}

/// Derive coast flags, and corner ocean/water flags, from the center
/// classification.
///
/// A center is coast when it has both an ocean neighbor and a land
/// neighbor. A corner is ocean when every center it touches is ocean, coast
/// when it touches both ocean and land, and water when it is on the border
/// or touches some water without being coast.
pub fn assign_coast(mut mesh: DualMesh) -> DualMesh {
    for i in 0..mesh.centers.len() {
        let mut num_ocean = 0usize;
        let mut num_land = 0usize;
        for &r in &mesh.centers[i].neighbors {
            let neighbor = &mesh.centers[r];
            if neighbor.ocean {
                num_ocean += 1;
            }
            if !neighbor.water {
                num_land += 1;
            }
        }
        mesh.centers[i].coast = num_ocean > 0 && num_land > 0;
    }

    for i in 0..mesh.corners.len() {
        let mut num_ocean = 0usize;
        let mut num_land = 0usize;
        for &p in &mesh.corners[i].touches {
            let center = &mesh.centers[p];
            if center.ocean {
                num_ocean += 1;
            }
            if !center.water {
                num_land += 1;
            }
        }

        let corner = &mut mesh.corners[i];
        let num_touches = corner.touches.len();
        corner.ocean = num_touches > 0 && num_ocean == num_touches;
        corner.coast = num_ocean > 0 && num_land > 0;
        corner.water = corner.border || (num_land != num_touches && !corner.coast);
    }

    mesh
}
