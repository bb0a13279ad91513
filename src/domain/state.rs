// Domain-level simulation entities and the authoritative state record.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Vector3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A tetrahedron corner: position plus its cosmetic quantum attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vector3,
    pub energy: f64,
    pub spin: f64,
    pub mass_projection: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Matter,
    Antimatter,
}

impl ParticleKind {
    pub const fn opposite(self) -> Self {
        match self {
            ParticleKind::Matter => ParticleKind::Antimatter,
            ParticleKind::Antimatter => ParticleKind::Matter,
        }
    }
}

/// One half of a pair. Entities have no lifecycle outside the pair that owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct Tetrahedron {
    pub id: String,
    pub vertices: [Vertex; 4],
    pub center: Vector3,
    pub energy_state: f64,
    // Always > 0; fixed at creation.
    pub oscillation_frequency: f64,
    // Radians, never normalized.
    pub phase: f64,
    pub kind: ParticleKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TetrahedronPair {
    pub id: String,
    pub matter: Tetrahedron,
    pub antimatter: Tetrahedron,
    // Recomputed every tick, 0.0..=1.0.
    pub stability_factor: f64,
    // Fixed at creation, 0.0 < strength <= 1.0.
    pub pairing_strength: f64,
    pub entangled: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything the engine owns: the pair collection plus aggregate metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub id: String,
    // Insertion ordered; ids are unique.
    pub pairs: Vec<TetrahedronPair>,
    pub total_stability: f64,
    pub system_energy: f64,
    pub time_step: f64,
    pub running: bool,
}

impl SimulationState {
    /// Fresh, stopped state with no pairs and a new identifier.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pairs: Vec::new(),
            total_stability: 0.0,
            system_energy: 0.0,
            time_step: 0.0,
            running: false,
        }
    }

    pub fn pair(&self, pair_id: &str) -> Option<&TetrahedronPair> {
        self.pairs.iter().find(|p| p.id == pair_id)
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
