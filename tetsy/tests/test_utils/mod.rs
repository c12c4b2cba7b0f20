use tetsy::{EdgeLengthSource, Material, Solid, SolidConfig};

/// Vertex positions of a regular tetrahedron with unit edge length, wound so
/// the signed volume is positive.
pub fn regular_tet_positions() -> Vec<f64> {
    let s = 0.125f64.sqrt();
    vec![
        s, s, s, //
        s, -s, -s, //
        -s, s, -s, //
        -s, -s, s, //
    ]
}

/// Two unit-edge regular tetrahedra sharing the face `{1, 2, 3}`: the second
/// element mirrors vertex 0 through that face.
#[allow(dead_code)]
pub fn two_tet_positions() -> Vec<f64> {
    let s = 0.125f64.sqrt();
    let mut positions = regular_tet_positions();
    positions.extend_from_slice(&[-5.0 * s / 3.0, -5.0 * s / 3.0, -5.0 * s / 3.0]);
    positions
}

#[allow(dead_code)]
pub fn one_tet_config(material: Material) -> SolidConfig {
    SolidConfig {
        tets: vec![0, 1, 2, 3],
        edge_ids: vec![],
        material,
    }
}

#[allow(dead_code)]
pub fn two_tet_config(material: Material) -> SolidConfig {
    SolidConfig {
        tets: vec![0, 1, 2, 3, 4, 2, 1, 3],
        edge_ids: vec![],
        material,
    }
}

pub fn default_material() -> Material {
    Material::from_young_poisson(100.0, 0.3)
}

pub fn build_tracked(config: &SolidConfig, rest_positions: &[f64]) -> Solid {
    Solid::try_new(config, rest_positions, EdgeLengthSource::Tracked)
        .expect("failed to build a solid instance")
}

/// One evaluator step on a zeroed output array.
pub fn step_forces(solid: &mut Solid, positions: &[f64], time_step: f64) -> Vec<f64> {
    let mut forces = vec![0.0; positions.len()];
    solid.add_forces(positions, time_step, None, &mut forces);
    forces
}

#[allow(dead_code)]
pub fn vertex_force(forces: &[f64], vertex: usize) -> [f64; 3] {
    [
        forces[3 * vertex],
        forces[3 * vertex + 1],
        forces[3 * vertex + 2],
    ]
}

#[allow(dead_code)]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[allow(dead_code)]
pub fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Unit vector from vertex `from` to vertex `to`.
#[allow(dead_code)]
pub fn edge_direction(positions: &[f64], to: usize, from: usize) -> [f64; 3] {
    let d = [
        positions[3 * to] - positions[3 * from],
        positions[3 * to + 1] - positions[3 * from + 1],
        positions[3 * to + 2] - positions[3 * from + 2],
    ];
    let len = dot(d, d).sqrt();
    [d[0] / len, d[1] / len, d[2] / len]
}

pub fn init_logger() {
    let _ = env_logger::Builder::from_env("TETSY_LOG")
        .is_test(true)
        .try_init();
}
