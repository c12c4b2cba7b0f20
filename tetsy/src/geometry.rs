//! Tetrahedron geometry kernels used by the metric assembler and the force
//! evaluator.

use na::{Matrix3, Vector3};

use crate::stencil::{EDGE_VERTS, NUM_EDGES, NUM_VERTS};

/// Signed volume of the indexed tetrahedron.
///
/// The sign encodes orientation and is not corrected here: a consistently
/// wound mesh yields positive volumes, an inverted element a negative one.
#[inline]
pub(crate) fn signed_volume(positions: &[[f64; 3]], verts: &[usize; NUM_VERTS]) -> f64 {
    let origin = Vector3::from(positions[verts[0]]);
    let edge1 = Vector3::from(positions[verts[1]]) - origin;
    let edge2 = Vector3::from(positions[verts[2]]) - origin;
    let edge3 = Vector3::from(positions[verts[3]]) - origin;
    edge2.cross(&edge1).dot(&edge3) / 6.0
}

/// Edge-strain basis tensor: the symmetrized tensor product of the area
/// normals of the two faces not adjacent to the edge, over `36·2·volume²`.
///
/// This is the 3D form of the basis from the remark at the end of section
/// 4.1 of Weischedel, "A discrete geometric view on shear-deformable shell
/// models"; it reproduces linear finite elements coordinate-free.
#[inline]
pub(crate) fn edge_basis(
    positions: &[[f64; 3]],
    verts: &[usize; NUM_VERTS],
    left_face: &[usize; 3],
    right_face: &[usize; 3],
    volume: f64,
) -> Matrix3<f64> {
    let pos = |slot: usize| Vector3::from(positions[verts[slot]]);

    let normal_l =
        (pos(left_face[1]) - pos(left_face[0])).cross(&(pos(left_face[2]) - pos(left_face[0])));
    let normal_r =
        (pos(right_face[1]) - pos(right_face[0])).cross(&(pos(right_face[2]) - pos(right_face[0])));

    (normal_l * normal_r.transpose() + normal_r * normal_l.transpose())
        / (36.0 * 2.0 * volume * volume)
}

/// Gradient of each local edge's squared length with respect to its two
/// endpoint positions: `x_a - x_b` at endpoint `a` and the negation at `b`.
/// The factor of 2 is absorbed by the metric's calibration.
#[inline]
pub(crate) fn squared_length_gradients(
    positions: &[[f64; 3]],
    verts: &[usize; NUM_VERTS],
) -> [[Vector3<f64>; 2]; NUM_EDGES] {
    let mut gradient = [[Vector3::zeros(); 2]; NUM_EDGES];
    for (grad, &[a, b]) in gradient.iter_mut().zip(EDGE_VERTS.iter()) {
        let d = Vector3::from(positions[verts[a]]) - Vector3::from(positions[verts[b]]);
        *grad = [d, -d];
    }
    gradient
}

/// Write the squared length of every edge into `lengths`.
#[inline]
pub(crate) fn update_squared_lengths(
    lengths: &mut [f64],
    edges: &[[usize; 2]],
    positions: &[[f64; 3]],
) {
    debug_assert_eq!(lengths.len(), edges.len());
    for (length, &[i, j]) in lengths.iter_mut().zip(edges.iter()) {
        *length = (Vector3::from(positions[i]) - Vector3::from(positions[j])).norm_squared();
    }
}
