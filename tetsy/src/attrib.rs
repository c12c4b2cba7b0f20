//! Names and parsers for the attribute table supplied by the host.

use crate::Error;

pub const FACE_ATTRIB: &str = "face";
pub const EDGE_ATTRIB: &str = "edge";
pub const YOUNG_ATTRIB: &str = "young";
pub const POISSON_ATTRIB: &str = "poisson";
pub const DAMPING_ATTRIB: &str = "damping";

/// Parse an attribute value as a single decimal scalar.
///
/// The whole trimmed value must be consumed by the parse; trailing garbage is
/// rejected rather than ignored.
pub fn parse_scalar(name: &'static str, value: &str) -> Result<f64, Error> {
    value.trim().parse().map_err(|_| Error::InvalidAttribute {
        name,
        value: value.to_string(),
    })
}

/// Parse an attribute value as a whitespace-separated index list.
///
/// An empty value parses to an empty list.
pub fn parse_indices(name: &'static str, value: &str) -> Result<Vec<usize>, Error> {
    value
        .split_whitespace()
        .map(|word| {
            word.parse().map_err(|_| Error::InvalidAttribute {
                name,
                value: word.to_string(),
            })
        })
        .collect()
}
