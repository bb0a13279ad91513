use crate::domain::state::TetrahedronPair;
use crate::domain::tuning::stability::StabilityTuning;

/// Instantaneous stability of a pair, clamped to `0.0..=1.0`.
///
/// Product of four factors: separation vs. the optimal distance, how well the two energy
/// states cancel, phase alignment, and the pair's fixed pairing strength.
pub fn compute_stability(pair: &TetrahedronPair, tuning: &StabilityTuning) -> f64 {
    let matter = &pair.matter;
    let antimatter = &pair.antimatter;

    let distance = matter.center.distance_to(&antimatter.center);
    let distance_factor = 1.0 / (1.0 + (distance - tuning.optimal_distance).abs());

    let energy_balance = 1.0 - (matter.energy_state + antimatter.energy_state).abs() / 2.0;

    let phase_sync = (1.0 + (matter.phase - antimatter.phase).cos()) / 2.0;

    let stability = distance_factor * energy_balance * phase_sync * pair.pairing_strength;
    // NaN only comes from non-finite entity state; treat it as fully unstable.
    if stability.is_nan() {
        return 0.0;
    }
    stability.clamp(0.0, 1.0)
}
