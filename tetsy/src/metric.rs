//! Per-element elastic metric assembly.
//!
//! Each tetrahedron carries a symmetric 6×6 quadratic form over its edge
//! elongations: the linearized elastic energy is `½·eᵀ·M·e` for an elongation
//! vector `e` in squared-length coordinates, and the force evaluator
//! contracts elongations through `M`. A diagonal `M = diag(1/reference)`
//! degenerates the model to ordinary mass-springs.

use na::{Matrix3, Matrix6};
use unroll::unroll_for_loops;

use crate::geometry::{edge_basis, signed_volume};
use crate::material::Material;
use crate::stencil::{EDGE_COMPLEMENT_FACES, FACE_VERTS};

/// Assemble the elastic metric of one element from its rest positions.
///
/// Strain invariants are taken pairwise over the six edge bases: the first
/// is the basis trace, the second the double contraction `tr(Bₐ·B_b)`. Lamé
/// parameters are scaled by the element's signed volume, so an inverted
/// element yields a sign-flipped metric rather than an error.
#[unroll_for_loops]
pub(crate) fn element_metric(
    positions: &[[f64; 3]],
    verts: &[usize; 4],
    material: &Material,
) -> Matrix6<f64> {
    let volume = signed_volume(positions, verts);

    let mut basis = [Matrix3::zeros(); 6];
    for e in 0..6 {
        let [left, right] = EDGE_COMPLEMENT_FACES[e];
        basis[e] = edge_basis(positions, verts, &FACE_VERTS[left], &FACE_VERTS[right], volume);
    }

    // First invariant: trace of each edge basis.
    let mut trace = [0.0; 6];
    for e in 0..6 {
        trace[e] = basis[e].trace();
    }

    // Second invariant: pairwise double contraction of the bases.
    let mut contraction = [[0.0; 6]; 6];
    for ed1 in 0..6 {
        for ed2 in 0..6 {
            for i in 0..3 {
                for j in 0..3 {
                    contraction[ed1][ed2] += basis[ed1][(i, j)] * basis[ed2][(j, i)];
                }
            }
        }
    }

    let (lambda, mu) = material.lame_parameters();
    let (lambda, mu) = (lambda * volume, mu * volume);

    Matrix6::from_fn(|ed1, ed2| mu * contraction[ed1][ed2] + lambda * trace[ed1] * trace[ed2])
}
