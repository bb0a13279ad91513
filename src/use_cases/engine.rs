// Authoritative simulation engine: pair lifecycle, the fixed-step tick and aggregates.

use crate::domain::errors::SimulationError;
use crate::domain::geometry::make_tetrahedron_vertices;
use crate::domain::ports::RandomSource;
use crate::domain::state::{ParticleKind, SimulationState, Tetrahedron, TetrahedronPair, Vector3};
use crate::domain::systems::{oscillation, stability};
use crate::domain::tuning::pair::PairTuning;
use crate::domain::tuning::stability::StabilityTuning;
use chrono::Utc;
use std::f64::consts::PI;
use std::ops::Range;

/// Owns the simulation state and the random source used to seed new pairs.
///
/// Not synchronized on its own; callers wrap it in a single exclusive lock.
pub struct SimulationEngine {
    state: SimulationState,
    random: Box<dyn RandomSource>,
    pair_tuning: PairTuning,
    stability_tuning: StabilityTuning,
}

impl SimulationEngine {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self::with_tuning(random, PairTuning::default(), StabilityTuning::default())
    }

    pub fn with_tuning(
        random: Box<dyn RandomSource>,
        pair_tuning: PairTuning,
        stability_tuning: StabilityTuning,
    ) -> Self {
        Self {
            state: SimulationState::new(),
            random,
            pair_tuning,
            stability_tuning,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn default_separation(&self) -> f64 {
        self.pair_tuning.default_separation
    }

    pub fn start(&mut self) {
        self.state.running = true;
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }

    /// Replaces the whole state with a fresh, stopped one under a new identifier.
    pub fn reset(&mut self) {
        self.state = SimulationState::new();
    }

    /// Builds a matter/antimatter pair straddling `center` along the x axis and stores it.
    pub fn create_pair(
        &mut self,
        center: Vector3,
        separation: f64,
    ) -> Result<TetrahedronPair, SimulationError> {
        validate_placement(center, separation)?;

        let half = separation / 2.0;
        let size = self.pair_tuning.tetrahedron_size;

        let matter_center = Vector3::new(center.x - half, center.y, center.z);
        let matter_vertices = make_tetrahedron_vertices(
            matter_center,
            size,
            self.random.as_mut(),
            &self.pair_tuning,
        );
        let frequency = draw(self.random.as_mut(), &self.pair_tuning.oscillation_frequency);
        let phase = draw(self.random.as_mut(), &self.pair_tuning.initial_phase);
        let matter = Tetrahedron {
            id: uuid::Uuid::new_v4().to_string(),
            vertices: matter_vertices,
            center: matter_center,
            energy_state: self.pair_tuning.initial_energy_state,
            oscillation_frequency: frequency,
            phase,
            kind: ParticleKind::Matter,
        };

        let antimatter_center = Vector3::new(center.x + half, center.y, center.z);
        let antimatter_vertices = make_tetrahedron_vertices(
            antimatter_center,
            size,
            self.random.as_mut(),
            &self.pair_tuning,
        );
        let antimatter = Tetrahedron {
            id: uuid::Uuid::new_v4().to_string(),
            vertices: antimatter_vertices,
            center: antimatter_center,
            energy_state: -self.pair_tuning.initial_energy_state,
            oscillation_frequency: frequency,
            phase: phase + PI,
            kind: ParticleKind::Antimatter,
        };

        let pairing_strength = draw(self.random.as_mut(), &self.pair_tuning.pairing_strength);
        let mut pair = TetrahedronPair {
            id: uuid::Uuid::new_v4().to_string(),
            matter,
            antimatter,
            stability_factor: 0.0,
            pairing_strength,
            entangled: true,
            created_at: Utc::now(),
        };
        pair.stability_factor = stability::compute_stability(&pair, &self.stability_tuning);

        self.state.pairs.push(pair.clone());
        Ok(pair)
    }

    /// Removes the pair with `pair_id`; returns whether it existed.
    pub fn remove_pair(&mut self, pair_id: &str) -> bool {
        let before = self.state.pairs.len();
        self.state.pairs.retain(|p| p.id != pair_id);
        self.state.pairs.len() != before
    }

    pub fn pair(&self, pair_id: &str) -> Option<&TetrahedronPair> {
        self.state.pair(pair_id)
    }

    pub fn pairs(&self) -> &[TetrahedronPair] {
        &self.state.pairs
    }

    /// Advances every pair's oscillation by `dt` simulated seconds and refreshes its stability.
    ///
    /// A zero (or non-finite) step leaves the state untouched.
    pub fn tick(&mut self, dt: f64) {
        if dt == 0.0 || !dt.is_finite() {
            return;
        }

        let tuning = self.stability_tuning;
        for pair in &mut self.state.pairs {
            oscillation::advance_entity(&mut pair.matter, dt, &tuning);
            oscillation::advance_entity(&mut pair.antimatter, dt, &tuning);
            pair.stability_factor = stability::compute_stability(pair, &tuning);
        }
    }

    /// Mean pair stability (0 when empty) and summed absolute entity energy.
    pub fn recompute_aggregates(&mut self) {
        let pairs = &self.state.pairs;
        if pairs.is_empty() {
            self.state.total_stability = 0.0;
            self.state.system_energy = 0.0;
            return;
        }

        let stability_sum: f64 = pairs.iter().map(|p| p.stability_factor).sum();
        self.state.total_stability = stability_sum / pairs.len() as f64;
        self.state.system_energy = pairs
            .iter()
            .map(|p| p.matter.energy_state.abs() + p.antimatter.energy_state.abs())
            .sum();
    }

    /// One loop iteration: tick, advance the simulated clock, refresh aggregates.
    pub fn step(&mut self, dt: f64) {
        self.tick(dt);
        self.state.time_step += dt;
        self.recompute_aggregates();
    }

    /// Snapshot of the full state with freshly computed aggregates.
    pub fn current_state(&mut self) -> SimulationState {
        self.recompute_aggregates();
        self.state.clone()
    }
}

fn draw(random: &mut dyn RandomSource, range: &Range<f64>) -> f64 {
    random.uniform(range.start, range.end)
}

fn validate_placement(center: Vector3, separation: f64) -> Result<(), SimulationError> {
    if !center.is_finite() {
        return Err(SimulationError::InvalidArgument(
            "center coordinates must be finite".to_string(),
        ));
    }
    if !separation.is_finite() || separation <= 0.0 {
        return Err(SimulationError::InvalidArgument(
            "separation must be a positive finite number".to_string(),
        ));
    }
    Ok(())
}
