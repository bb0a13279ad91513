// Wire protocol DTOs and conversions for HTTP responses, WebSocket snapshots and stored records.
// Field names are part of the public contract; keep them stable.

use crate::domain::{ParticleKind, SimulationState, Tetrahedron, TetrahedronPair, Vector3, Vertex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3Dto {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vector3> for Vector3Dto {
    fn from(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDto {
    pub position: Vector3Dto,
    pub energy: f64,
    pub spin: f64,
    pub mass_projection: f64,
}

impl From<&Vertex> for VertexDto {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.into(),
            energy: v.energy,
            spin: v.spin,
            mass_projection: v.mass_projection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleTypeDto {
    Matter,
    Antimatter,
}

impl From<ParticleKind> for ParticleTypeDto {
    fn from(kind: ParticleKind) -> Self {
        match kind {
            ParticleKind::Matter => ParticleTypeDto::Matter,
            ParticleKind::Antimatter => ParticleTypeDto::Antimatter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TetrahedronDto {
    pub id: String,
    pub vertices: Vec<VertexDto>,
    pub center: Vector3Dto,
    pub energy_state: f64,
    pub oscillation_frequency: f64,
    pub phase: f64,
    pub particle_type: ParticleTypeDto,
}

impl From<&Tetrahedron> for TetrahedronDto {
    fn from(t: &Tetrahedron) -> Self {
        Self {
            id: t.id.clone(),
            vertices: t.vertices.iter().map(VertexDto::from).collect(),
            center: t.center.into(),
            energy_state: t.energy_state,
            oscillation_frequency: t.oscillation_frequency,
            phase: t.phase,
            particle_type: t.kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDto {
    pub id: String,
    pub matter_tetrahedron: TetrahedronDto,
    pub antimatter_tetrahedron: TetrahedronDto,
    pub stability_factor: f64,
    pub pairing_strength: f64,
    pub entanglement_connection: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&TetrahedronPair> for PairDto {
    fn from(pair: &TetrahedronPair) -> Self {
        Self {
            id: pair.id.clone(),
            matter_tetrahedron: TetrahedronDto::from(&pair.matter),
            antimatter_tetrahedron: TetrahedronDto::from(&pair.antimatter),
            stability_factor: pair.stability_factor,
            pairing_strength: pair.pairing_strength,
            entanglement_connection: pair.entangled,
            created_at: pair.created_at,
        }
    }
}

/// Full simulation snapshot; also the payload of every WebSocket frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStateDto {
    pub id: String,
    pub pairs: Vec<PairDto>,
    pub total_stability: f64,
    pub system_energy: f64,
    pub time_step: f64,
    pub running: bool,
}

impl From<&SimulationState> for SimulationStateDto {
    fn from(state: &SimulationState) -> Self {
        Self {
            id: state.id.clone(),
            pairs: state.pairs.iter().map(PairDto::from).collect(),
            total_stability: state.total_stability,
            system_energy: state.system_energy,
            time_step: state.time_step,
            running: state.running,
        }
    }
}

/// Query parameters for pair creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePairQuery {
    #[serde(default)]
    pub center_x: f64,
    #[serde(default)]
    pub center_y: f64,
    #[serde(default)]
    pub center_z: f64,
    // Absent means the tuned default separation.
    #[serde(default)]
    pub separation: Option<f64>,
}

impl CreatePairQuery {
    pub fn center(&self) -> Vector3 {
        Vector3::new(self.center_x, self.center_y, self.center_z)
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePairResponse {
    pub message: String,
    pub pair_id: String,
}

#[derive(Debug, Serialize)]
pub struct PairsResponse {
    pub pairs: Vec<PairDto>,
}

// Acknowledgement for start/stop carrying the resulting running flag.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub message: String,
    pub running: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}
