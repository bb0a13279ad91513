// Vertex placement for tetrahedral entities and their mirrored counterparts.

use crate::domain::ports::RandomSource;
use crate::domain::state::{Tetrahedron, Vector3, Vertex};
use crate::domain::tuning::pair::PairTuning;

// Alternating corners of a cube; together they form a regular tetrahedron.
const CORNERS: [(f64, f64, f64); 4] = [
    (1.0, 1.0, 1.0),
    (1.0, -1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
];

/// Builds the four vertices of a regular tetrahedron around `center`.
///
/// Vertex attributes are drawn from `random` in vertex order (energy, spin, mass projection);
/// they are cosmetic and only range-bounded.
pub fn make_tetrahedron_vertices(
    center: Vector3,
    size: f64,
    random: &mut dyn RandomSource,
    tuning: &PairTuning,
) -> [Vertex; 4] {
    let scale = size / 3f64.sqrt();
    CORNERS.map(|(x, y, z)| Vertex {
        position: Vector3::new(
            center.x + x * scale,
            center.y + y * scale,
            center.z + z * scale,
        ),
        energy: random.uniform(tuning.vertex_energy.start, tuning.vertex_energy.end),
        spin: random.uniform(tuning.vertex_spin.start, tuning.vertex_spin.end),
        mass_projection: random.uniform(
            tuning.vertex_mass_projection.start,
            tuning.vertex_mass_projection.end,
        ),
    })
}

/// Produces the opposite-kind counterpart of `original`.
///
/// Vertices are reflected through the original center with energy and spin negated. The
/// counterpart keeps the same center and frequency, and its phase leads by pi.
pub fn mirror_entity(original: &Tetrahedron) -> Tetrahedron {
    let c = original.center;
    let vertices = original.vertices.clone().map(|v| Vertex {
        position: Vector3::new(
            2.0 * c.x - v.position.x,
            2.0 * c.y - v.position.y,
            2.0 * c.z - v.position.z,
        ),
        energy: -v.energy,
        spin: -v.spin,
        mass_projection: v.mass_projection,
    });

    Tetrahedron {
        id: uuid::Uuid::new_v4().to_string(),
        vertices,
        center: c,
        energy_state: -original.energy_state,
        oscillation_frequency: original.oscillation_frequency,
        phase: original.phase + std::f64::consts::PI,
        kind: original.kind.opposite(),
    }
}
