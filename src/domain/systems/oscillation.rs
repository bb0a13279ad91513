use crate::domain::state::{ParticleKind, Tetrahedron};
use crate::domain::tuning::stability::StabilityTuning;

/// Advances an entity's phase by `frequency * dt` and derives its energy state from it.
///
/// Matter oscillates around +1, antimatter around -1.
pub fn advance_entity(entity: &mut Tetrahedron, dt: f64, tuning: &StabilityTuning) {
    entity.phase += entity.oscillation_frequency * dt;
    let magnitude = 1.0 + tuning.oscillation_amplitude * entity.phase.sin();
    entity.energy_state = match entity.kind {
        ParticleKind::Matter => magnitude,
        ParticleKind::Antimatter => -magnitude,
    };
}
