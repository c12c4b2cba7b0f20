//! Local tetrahedron numbering and the shared-edge stencil.
//!
//! Connectivity is resolved once at setup: every distinct unordered vertex
//! pair gets one compact edge id, shared by all elements containing it.

use ahash::AHashMap;

/// Vertices per tetrahedron.
pub const NUM_VERTS: usize = 4;
/// Edges per tetrahedron.
pub const NUM_EDGES: usize = 6;

/// Local edge numbering: edge index to its two local vertex slots.
pub(crate) const EDGE_VERTS: [[usize; 2]; NUM_EDGES] =
    [[0, 1], [1, 2], [2, 0], [2, 3], [0, 3], [1, 3]];

/// Local face numbering: face index to its three local vertex slots.
pub(crate) const FACE_VERTS: [[usize; 3]; NUM_VERTS] =
    [[2, 1, 0], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

/// For each local edge, the two faces *not* adjacent to it. Each of these
/// faces contains exactly one endpoint of the edge.
pub(crate) const EDGE_COMPLEMENT_FACES: [[usize; 2]; NUM_EDGES] =
    [[2, 3], [1, 3], [2, 1], [1, 0], [0, 2], [0, 3]];

/// One tetrahedral element: four vertex indices and the global ids of its
/// six edges, both ordered by the local tables above.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TetElement {
    pub vertices: [usize; NUM_VERTS],
    pub edges: [usize; NUM_EDGES],
}

/// Vertex and edge connectivity for all elements of an instance.
#[derive(Clone, Debug, Default)]
pub struct Stencil {
    pub elements: Vec<TetElement>,
    /// Distinct mesh edges as `[min, max]` vertex pairs, indexed by edge id.
    pub edges: Vec<[usize; 2]>,
}

impl Stencil {
    /// Resolve the edge topology of `tets`.
    ///
    /// Edge ids are assigned in first-seen order and are compact: elements
    /// sharing a geometric edge resolve to the same id, and the ids cover
    /// `0..edges.len()` without gaps.
    ///
    /// When `edge_ids` carries a precomputed id per (element, local edge),
    /// the computed assignment is checked against it in debug builds. The
    /// supplied ids never participate in the construction itself.
    pub fn build(tets: &[[usize; NUM_VERTS]], edge_ids: Option<&[usize]>) -> Stencil {
        if let Some(edge_ids) = edge_ids {
            debug_assert_eq!(edge_ids.len(), NUM_EDGES * tets.len());
        }

        let mut elements = Vec::with_capacity(tets.len());
        let mut edges = Vec::with_capacity(NUM_EDGES * tets.len());
        let mut edge_indices: AHashMap<[usize; 2], usize> =
            AHashMap::with_capacity(NUM_EDGES * tets.len());

        for (t, &vertices) in tets.iter().enumerate() {
            let mut element = TetElement {
                vertices,
                edges: [0; NUM_EDGES],
            };

            for (e, &[a, b]) in EDGE_VERTS.iter().enumerate() {
                let (v0, v1) = (vertices[a], vertices[b]);
                let pair = if v0 < v1 { [v0, v1] } else { [v1, v0] };

                let next = edges.len();
                let id = *edge_indices.entry(pair).or_insert_with(|| {
                    edges.push(pair);
                    next
                });
                element.edges[e] = id;

                if let Some(edge_ids) = edge_ids {
                    debug_assert_eq!(
                        id,
                        edge_ids[NUM_EDGES * t + e],
                        "supplied edge id disagrees with the mesh connectivity"
                    );
                }
            }

            elements.push(element);
        }

        Stencil { elements, edges }
    }
}
