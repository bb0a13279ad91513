/// Constants of the fixed stability and oscillation formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityTuning {
    /// Center-to-center distance at which the distance factor peaks at 1.0.
    pub optimal_distance: f64,

    /// Amplitude of the energy oscillation around the unit baseline.
    pub oscillation_amplitude: f64,
}

impl Default for StabilityTuning {
    fn default() -> Self {
        Self {
            optimal_distance: 2.0,
            oscillation_amplitude: 0.3,
        }
    }
}
