use crate::interface_adapters::http::{ErrorResponse, error_response, map_simulation_error};
use crate::interface_adapters::protocol::{
    ControlResponse, CreatePairQuery, CreatePairResponse, MessageResponse, PairDto, PairsResponse,
    SimulationStateDto, StatusResponse,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Tetracore Server Running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// Snapshot with aggregates recomputed at read time.
pub async fn simulation_state(State(state): State<Arc<AppState>>) -> Json<SimulationStateDto> {
    let snapshot = state.simulation.current_state().await;
    Json(SimulationStateDto::from(&snapshot))
}

pub async fn start_simulation(State(state): State<Arc<AppState>>) -> Json<ControlResponse> {
    state.simulation.start().await;
    Json(ControlResponse {
        message: "Simulation started".to_string(),
        running: true,
    })
}

pub async fn stop_simulation(State(state): State<Arc<AppState>>) -> Json<ControlResponse> {
    state.simulation.stop().await;
    Json(ControlResponse {
        message: "Simulation stopped".to_string(),
        running: false,
    })
}

pub async fn reset_simulation(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.simulation.reset().await;
    Json(MessageResponse {
        message: "Simulation reset".to_string(),
    })
}

pub async fn create_pair(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreatePairQuery>,
) -> Result<Json<CreatePairResponse>, HandlerError> {
    let pair = state
        .simulation
        .create_pair(query.center(), query.separation)
        .await
        .map_err(map_simulation_error)?;

    Ok(Json(CreatePairResponse {
        message: "Tetrahedron pair created".to_string(),
        pair_id: pair.id,
    }))
}

pub async fn list_pairs(State(state): State<Arc<AppState>>) -> Json<PairsResponse> {
    let pairs = state.simulation.list_pairs().await;
    Json(PairsResponse {
        pairs: pairs.iter().map(PairDto::from).collect(),
    })
}

pub async fn get_pair(
    State(state): State<Arc<AppState>>,
    Path(pair_id): Path<String>,
) -> Result<Json<PairDto>, HandlerError> {
    let pair = state
        .simulation
        .get_pair(&pair_id)
        .await
        .map_err(map_simulation_error)?;

    Ok(Json(PairDto::from(&pair)))
}

// Deleting an unknown id is reported as 404 rather than silently succeeding.
pub async fn delete_pair(
    State(state): State<Arc<AppState>>,
    Path(pair_id): Path<String>,
) -> Result<Json<MessageResponse>, HandlerError> {
    if !state.simulation.remove_pair(&pair_id).await {
        return Err(error_response(StatusCode::NOT_FOUND, "pair not found"));
    }

    Ok(Json(MessageResponse {
        message: format!("Pair {pair_id} deleted"),
    }))
}
