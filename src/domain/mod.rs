// Domain layer: simulation types, geometry and per-pair rules.

pub mod errors;
pub mod geometry;
pub mod ports;
pub mod state;
pub mod systems;
#[cfg(test)]
pub(crate) mod test_support;
pub mod tuning;

pub use errors::{PersistenceError, SimulationError};
pub use state::{ParticleKind, SimulationState, Tetrahedron, TetrahedronPair, Vector3, Vertex};
