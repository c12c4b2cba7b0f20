//! The soft-body instance: setup-time assembly and the per-step force
//! evaluator.

use na::{Matrix6, Vector3};
use serde::{Deserialize, Serialize};
use unroll::unroll_for_loops;

use crate::attrib::{
    parse_indices, parse_scalar, DAMPING_ATTRIB, EDGE_ATTRIB, FACE_ATTRIB, POISSON_ATTRIB,
    YOUNG_ATTRIB,
};
use crate::geometry::{squared_length_gradients, update_squared_lengths};
use crate::material::Material;
use crate::metric::element_metric;
use crate::stencil::{Stencil, TetElement, EDGE_VERTS, NUM_EDGES, NUM_VERTS};
use crate::Error;

/// Where the per-step edge lengths come from. Decided once at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeLengthSource {
    /// The instance tracks squared edge lengths from the vertex positions it
    /// is handed, keeping the previous step's lengths for Rayleigh damping.
    Tracked,
    /// The host maintains current and rest edge lengths itself, as it does
    /// for its native flex meshes. No damping term in this mode.
    Host,
}

/// Per-edge length arrays supplied by the host for [`EdgeLengthSource::Host`]
/// instances. Entries are plain lengths, not squared, indexed by edge id.
#[derive(Copy, Clone, Debug)]
pub struct HostEdgeLengths<'a> {
    pub current: &'a [f64],
    pub rest: &'a [f64],
}

/// Parsed per-instance configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidConfig {
    /// Flat tetrahedron vertex indices, four per element, block-local.
    pub tets: Vec<usize>,
    /// Optional per-(element, local edge) edge ids, cross-checked against
    /// the computed topology. Empty means no check.
    pub edge_ids: Vec<usize>,
    pub material: Material,
}

impl SolidConfig {
    /// Read a configuration from the host's attribute table.
    ///
    /// `face`, `edge`, `young` and `poisson` are required; `damping`
    /// defaults to zero. A missing or malformed attribute rejects the whole
    /// configuration with a warning, so the host can carry on without the
    /// instance.
    pub fn from_attribs<'a, F>(mut lookup: F) -> Result<SolidConfig, Error>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        let config = Self::parse_attribs(&mut lookup);
        if let Err(err) = &config {
            log::warn!("Invalid solid configuration: {}", err);
        }
        config
    }

    fn parse_attribs<'a, F>(lookup: &mut F) -> Result<SolidConfig, Error>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        fn require<'a>(
            lookup: &mut impl FnMut(&str) -> Option<&'a str>,
            name: &'static str,
        ) -> Result<&'a str, Error> {
            lookup(name).ok_or(Error::MissingAttribute { name })
        }

        let tets = parse_indices(FACE_ATTRIB, require(lookup, FACE_ATTRIB)?)?;
        let edge_ids = parse_indices(EDGE_ATTRIB, require(lookup, EDGE_ATTRIB)?)?;
        let young = parse_scalar(YOUNG_ATTRIB, require(lookup, YOUNG_ATTRIB)?)?;
        let poisson = parse_scalar(POISSON_ATTRIB, require(lookup, POISSON_ATTRIB)?)?;
        let damping = match lookup(DAMPING_ATTRIB) {
            Some(value) => parse_scalar(DAMPING_ATTRIB, value)?,
            None => 0.0,
        };

        Ok(SolidConfig {
            tets,
            edge_ids,
            material: Material::from_young_poisson(young, poisson).with_damping(damping),
        })
    }
}

/// A tetrahedral soft body producing internal elastic restoring forces.
///
/// Topology, per-element metrics and rest lengths are fixed at construction;
/// only the per-step length buffers mutate afterwards, so the evaluator
/// allocates nothing in the steady state.
#[derive(Clone, Debug)]
pub struct Solid {
    stencil: Stencil,
    /// Elastic metric per element, row-indexed by the elongation-side edge.
    metric: Vec<Matrix6<f64>>,
    material: Material,
    source: EdgeLengthSource,
    /// Squared rest length per edge. Immutable after construction.
    reference: Vec<f64>,
    /// Squared length per edge at the previous step; the damping memory.
    previous: Vec<f64>,
    /// Squared length per edge at the current step.
    deformed: Vec<f64>,
    num_vertices: usize,
}

impl Solid {
    /// Build an instance from a configuration and the flat rest positions of
    /// its node block.
    ///
    /// The mesh is trusted as supplied: element volumes are used signed, so
    /// tetrahedra must be consistently wound and non-degenerate or the
    /// material response comes out scaled by the bad volumes. What *is*
    /// rejected is structural: index lists of the wrong multiplicity and
    /// elements referencing vertices outside the node block.
    pub fn try_new(
        config: &SolidConfig,
        rest_positions: &[f64],
        source: EdgeLengthSource,
    ) -> Result<Solid, Error> {
        if rest_positions.len() % 3 != 0 {
            return Err(Error::PositionCount {
                len: rest_positions.len(),
            });
        }
        if config.tets.len() % NUM_VERTS != 0 {
            return Err(Error::TetIndexCount {
                len: config.tets.len(),
            });
        }
        let tets: &[[usize; NUM_VERTS]] = bytemuck::cast_slice(&config.tets);
        if !config.edge_ids.is_empty() && config.edge_ids.len() != NUM_EDGES * tets.len() {
            return Err(Error::EdgeIndexCount {
                len: config.edge_ids.len(),
                expected: NUM_EDGES * tets.len(),
                num_elements: tets.len(),
            });
        }

        let rest: &[[f64; 3]] = bytemuck::cast_slice(rest_positions);
        let num_vertices = rest.len();

        let edge_ids = (!config.edge_ids.is_empty()).then_some(config.edge_ids.as_slice());
        let stencil = Stencil::build(tets, edge_ids);

        let mut metric = Vec::with_capacity(stencil.elements.len());
        for (t, element) in stencil.elements.iter().enumerate() {
            if let Some(&vertex) = element.vertices.iter().find(|&&v| v >= num_vertices) {
                return Err(Error::ForeignVertex {
                    element: t,
                    vertex,
                    num_vertices,
                });
            }
            metric.push(element_metric(rest, &element.vertices, &config.material));
        }

        let mut reference = vec![0.0; stencil.edges.len()];
        update_squared_lengths(&mut reference, &stencil.edges, rest);
        // Until the first step runs, the deformed lengths mirror the rest state.
        let previous = reference.clone();
        let deformed = reference.clone();

        log::debug!(
            "built solid: {} elements, {} edges, {} vertices, {:?} edge lengths",
            stencil.elements.len(),
            stencil.edges.len(),
            num_vertices,
            source,
        );

        Ok(Solid {
            stencil,
            metric,
            material: config.material,
            source,
            reference,
            previous,
            deformed,
            num_vertices,
        })
    }

    pub fn num_elements(&self) -> usize {
        self.stencil.elements.len()
    }

    pub fn num_edges(&self) -> usize {
        self.stencil.edges.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Distinct mesh edges as `[min, max]` vertex pairs, indexed by edge id.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.stencil.edges
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Squared rest length of every edge, indexed by edge id. Hosts that
    /// maintain their own edge arrays can seed them from this.
    pub fn reference_squared_lengths(&self) -> &[f64] {
        &self.reference
    }

    /// Accumulate this step's restoring forces into `forces`.
    ///
    /// `positions` and `forces` are flat block-local arrays of matching
    /// length. Contributions are subtracted: the force opposes elongation.
    /// `host` must be `Some` for [`EdgeLengthSource::Host`] instances and is
    /// ignored otherwise. `time_step` only enters the damping term and is
    /// expected to be positive.
    pub fn add_forces(
        &mut self,
        positions: &[f64],
        time_step: f64,
        host: Option<HostEdgeLengths>,
        forces: &mut [f64],
    ) {
        debug_assert_eq!(positions.len(), 3 * self.num_vertices);
        debug_assert_eq!(forces.len(), positions.len());
        let pos: &[[f64; 3]] = bytemuck::cast_slice(positions);
        let out: &mut [[f64; 3]] = bytemuck::cast_slice_mut(forces);

        let host = match self.source {
            EdgeLengthSource::Tracked => {
                update_squared_lengths(&mut self.deformed, &self.stencil.edges, pos);
                None
            }
            EdgeLengthSource::Host => {
                let lengths =
                    host.expect("host edge lengths are required for a host-managed instance");
                debug_assert_eq!(lengths.current.len(), self.stencil.edges.len());
                debug_assert_eq!(lengths.rest.len(), self.stencil.edges.len());
                Some(lengths)
            }
        };

        for (element, metric) in self.stencil.elements.iter().zip(self.metric.iter()) {
            let gradient = squared_length_gradients(pos, &element.vertices);

            let elongation = match host {
                None => self.tracked_elongation(element, time_step),
                Some(lengths) => host_elongation(element, lengths),
            };

            let force = contract(metric, &elongation, &gradient);

            for (slot, &vertex) in element.vertices.iter().enumerate() {
                for x in 0..3 {
                    out[vertex][x] -= force[slot][x];
                }
            }
        }

        if self.source == EdgeLengthSource::Tracked {
            self.previous.copy_from_slice(&self.deformed);
        }
    }

    /// Elongation of each local edge from the tracked squared lengths, with
    /// the velocity term of the generalized Rayleigh damping in section 5.2
    /// of Kharevych et al., "Geometric, Variational Integrators for Computer
    /// Animation".
    #[unroll_for_loops]
    fn tracked_elongation(&self, element: &TetElement, time_step: f64) -> [f64; NUM_EDGES] {
        let damping_rate = self.material.damping / time_step;
        let mut elongation = [0.0; NUM_EDGES];
        for e in 0..6 {
            let edge = element.edges[e];
            elongation[e] = self.deformed[edge] - self.reference[edge]
                + (self.deformed[edge] - self.previous[edge]) * damping_rate;
        }
        elongation
    }
}

/// Elongation of each local edge from the host's length arrays.
#[unroll_for_loops]
fn host_elongation(element: &TetElement, lengths: HostEdgeLengths) -> [f64; NUM_EDGES] {
    let mut elongation = [0.0; NUM_EDGES];
    for e in 0..6 {
        let edge = element.edges[e];
        let deformed = lengths.current[edge] * lengths.current[edge];
        let reference = lengths.rest[edge] * lengths.rest[edge];
        elongation[e] = deformed - reference;
    }
    elongation
}

/// Contract the elongations through the element metric against the
/// squared-length gradients, yielding one force vector per element vertex.
#[unroll_for_loops]
fn contract(
    metric: &Matrix6<f64>,
    elongation: &[f64; NUM_EDGES],
    gradient: &[[Vector3<f64>; 2]; NUM_EDGES],
) -> [[f64; 3]; NUM_VERTS] {
    let mut force = [[0.0; 3]; NUM_VERTS];
    for ed1 in 0..6 {
        for ed2 in 0..6 {
            let weight = elongation[ed1] * metric[(ed1, ed2)];
            for endpoint in 0..2 {
                let vertex = EDGE_VERTS[ed2][endpoint];
                for x in 0..3 {
                    force[vertex][x] += weight * gradient[ed2][endpoint][x];
                }
            }
        }
    }
    force
}
