//! Edge-based elastic forces for tetrahedral soft bodies.
//!
//! A [`Solid`] is assembled once from mesh connectivity, rest positions and
//! material parameters; on every simulation step it folds its restoring
//! forces into the host's generalized-force array.

mod attrib;
mod geometry;
mod material;
mod metric;
mod solid;
mod stencil;

pub use attrib::*;
pub use material::Material;
pub use solid::{EdgeLengthSource, HostEdgeLengths, Solid, SolidConfig};
pub use stencil::{Stencil, TetElement, NUM_EDGES, NUM_VERTS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required attribute is absent from the configuration table.
    #[error("Missing attribute: {name:?}")]
    MissingAttribute { name: &'static str },
    /// An attribute value failed to parse.
    #[error("Invalid value for attribute {name:?}: {value:?}")]
    InvalidAttribute { name: &'static str, value: String },
    #[error("Tetrahedron index count {len} is not a multiple of 4")]
    TetIndexCount { len: usize },
    #[error("Got {len} edge ids for {num_elements} elements, expected {expected}")]
    EdgeIndexCount {
        len: usize,
        expected: usize,
        num_elements: usize,
    },
    #[error("Position component count {len} is not a multiple of 3")]
    PositionCount { len: usize },
    /// An element references a vertex that is not part of this instance's
    /// node block, so the configuration and the mesh disagree irreconcilably.
    #[error("Element {element} references vertex {vertex} outside the node block of {num_vertices} vertices")]
    ForeignVertex {
        element: usize,
        vertex: usize,
        num_vertices: usize,
    },
}
