use std::f64::consts::TAU;
use std::ops::Range;

/// Creation-time tuning for matter/antimatter pairs.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct PairTuning {
    /// Edge scale of each tetrahedron; vertices sit at `size / sqrt(3)` per axis.
    pub tetrahedron_size: f64,

    /// Distance between the two entity centers when the caller does not pick one.
    pub default_separation: f64,

    /// Range for per-vertex energy.
    pub vertex_energy: Range<f64>,

    /// Range for per-vertex spin.
    pub vertex_spin: Range<f64>,

    /// Range for per-vertex mass projection.
    pub vertex_mass_projection: Range<f64>,

    /// Oscillation frequency shared by both halves of a pair, in radians per simulated second.
    pub oscillation_frequency: Range<f64>,

    /// Initial matter phase in radians.
    pub initial_phase: Range<f64>,

    /// Range for the pairing strength fixed at creation.
    pub pairing_strength: Range<f64>,

    /// Energy state assigned to a freshly built matter entity (antimatter gets the negation).
    pub initial_energy_state: f64,
}

impl Default for PairTuning {
    fn default() -> Self {
        Self {
            tetrahedron_size: 1.0,
            default_separation: 2.0,
            vertex_energy: 0.5..1.5,
            vertex_spin: -1.0..1.0,
            vertex_mass_projection: 0.8..1.2,
            oscillation_frequency: 0.5..2.0,
            initial_phase: 0.0..TAU,
            pairing_strength: 0.7..1.0,
            initial_energy_state: 1.0,
        }
    }
}
