//! Downslope and watershed links between corners.
//!
//! These only record where water would drain; no rivers are traced.

use crate::mesh::DualMesh;

/// Upper bound on watershed propagation rounds.
pub const MAX_WATERSHED_ROUNDS: usize = 100;

/// Point every corner at its lowest adjacent corner that is not higher
/// than itself. Ties go to the later neighbor; corners with no such
/// neighbor get `None`.
pub fn calculate_downslopes(mut mesh: DualMesh) -> DualMesh {
    for q in 0..mesh.corners.len() {
        let mut lowest = mesh.corners[q].elevation;
        let mut downslope = None;

        for &s in &mesh.corners[q].adjacent {
            if mesh.corners[s].elevation <= lowest {
                lowest = mesh.corners[s].elevation;
                downslope = Some(s);
            }
        }

        mesh.corners[q].downslope = downslope;
    }

    mesh
}

/// Follow downslope links to the coast and count each watershed.
///
/// Ocean and coast corners are their own watershed. Everything else starts
/// at its downslope and repeatedly takes over its downslope's watershed
/// until that would lead into the ocean, for at most
/// [`MAX_WATERSHED_ROUNDS`] rounds.
pub fn calculate_watersheds(mut mesh: DualMesh) -> DualMesh {
    for corner in mesh.corners.iter_mut() {
        corner.watershed = Some(corner.index);
        corner.watershed_size = 0;
        if !corner.ocean && !corner.coast {
            if let Some(d) = corner.downslope {
                corner.watershed = Some(d);
            }
        }
    }

    let mut rounds = 0;
    while rounds < MAX_WATERSHED_ROUNDS {
        rounds += 1;
        let mut changed = false;

        for q in 0..mesh.corners.len() {
            let corner = &mesh.corners[q];
            if corner.ocean || corner.coast {
                continue;
            }
            let (Some(w), Some(d)) = (corner.watershed, corner.downslope) else {
                continue;
            };
            if mesh.corners[w].coast {
                continue;
            }

            if let Some(r) = mesh.corners[d].watershed {
                if !mesh.corners[r].ocean && corner.watershed != Some(r) {
                    mesh.corners[q].watershed = Some(r);
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    for q in 0..mesh.corners.len() {
        if let Some(r) = mesh.corners[q].watershed {
            mesh.corners[r].watershed_size += 1;
        }
    }

    tracing::debug!(
        target: "mapgen::drainage",
        rounds,
        roots = mesh.corners.iter().filter(|c| c.watershed == Some(c.index)).count(),
        "drainage.watersheds"
    );

    mesh
}
