use crate::interface_adapters::handlers::{
    create_pair, delete_pair, get_pair, list_pairs, reset_simulation, simulation_state,
    start_simulation, status, stop_simulation,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/simulation/state", get(simulation_state))
        .route("/api/simulation/start", post(start_simulation))
        .route("/api/simulation/stop", post(stop_simulation))
        .route("/api/simulation/reset", post(reset_simulation))
        .route("/api/pairs/create", post(create_pair))
        .route("/api/pairs", get(list_pairs))
        .route("/api/pairs/{pair_id}", get(get_pair).delete(delete_pair))
        .route("/api/ws", get(ws_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::net::SubscriberRegistry;
    use crate::interface_adapters::stores::InMemoryPairStore;
    use crate::use_cases::test_support::FixedRandom;
    use crate::use_cases::{SimulationEngine, SimulationHandle};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        let simulation = SimulationHandle::new(
            SimulationEngine::new(Box::new(FixedRandom::fraction(0.5))),
            Arc::new(InMemoryPairStore::new()),
            Duration::from_secs(1),
        );
        app(Arc::new(AppState {
            simulation,
            subscribers: Arc::new(SubscriberRegistry::new(4)),
            subscriber_send_timeout: Duration::from_millis(500),
        }))
    }

    async fn send(app: &Router, method: &str, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("expected request to build");

        app.clone()
            .oneshot(request)
            .await
            .expect("router should be infallible")
    }

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn when_status_is_requested_then_returns_banner_and_version() {
        let app = build_test_app();

        let response = send(&app, "GET", "/api/status").await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["status"], "Tetracore Server Running");
        assert_eq!(payload["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn when_pair_is_created_with_defaults_then_it_can_be_fetched() {
        let app = build_test_app();

        let response = send(&app, "POST", "/api/pairs/create").await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["message"], "Tetrahedron pair created");
        let pair_id = created["pair_id"].as_str().expect("pair_id should be a string").to_string();

        let response = send(&app, "GET", &format!("/api/pairs/{pair_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let pair = json_body(response).await;
        assert_eq!(pair["id"], pair_id.as_str());
        assert_eq!(pair["matter_tetrahedron"]["center"]["x"], -1.0);
        assert_eq!(pair["antimatter_tetrahedron"]["center"]["x"], 1.0);
        assert_eq!(pair["entanglement_connection"], true);
    }

    #[tokio::test]
    async fn when_pair_is_created_with_query_then_center_and_separation_apply() {
        let app = build_test_app();

        let response = send(
            &app,
            "POST",
            "/api/pairs/create?center_x=1&center_y=2&center_z=3&separation=4",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let listed = json_body(send(&app, "GET", "/api/pairs").await).await;
        let pairs = listed["pairs"].as_array().expect("pairs should be an array");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0]["matter_tetrahedron"]["center"]["x"], -1.0);
        assert_eq!(pairs[0]["antimatter_tetrahedron"]["center"]["x"], 3.0);
        assert_eq!(pairs[0]["antimatter_tetrahedron"]["center"]["z"], 3.0);
    }

    #[tokio::test]
    async fn when_separation_is_not_positive_then_returns_400_and_error_message() {
        let app = build_test_app();

        let response = send(&app, "POST", "/api/pairs/create?separation=0").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = json_body(response).await;
        assert!(payload["error"].is_string());

        let listed = json_body(send(&app, "GET", "/api/pairs").await).await;
        assert_eq!(listed["pairs"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn when_pair_is_unknown_then_get_and_delete_return_404() {
        let app = build_test_app();

        let response = send(&app, "GET", "/api/pairs/unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "pair not found");

        let response = send(&app, "DELETE", "/api/pairs/unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "pair not found");
    }

    #[tokio::test]
    async fn when_pair_is_deleted_then_it_is_gone() {
        let app = build_test_app();
        let created = json_body(send(&app, "POST", "/api/pairs/create").await).await;
        let pair_id = created["pair_id"].as_str().expect("pair_id should be a string").to_string();

        let response = send(&app, "DELETE", &format!("/api/pairs/{pair_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["message"].is_string());

        let response = send(&app, "GET", &format!("/api/pairs/{pair_id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn when_simulation_is_started_stopped_and_reset_then_state_reflects_it() {
        let app = build_test_app();
        send(&app, "POST", "/api/pairs/create").await;

        let started = json_body(send(&app, "POST", "/api/simulation/start").await).await;
        assert_eq!(started["running"], true);
        let state = json_body(send(&app, "GET", "/api/simulation/state").await).await;
        assert_eq!(state["running"], true);
        let old_id = state["id"].clone();

        let stopped = json_body(send(&app, "POST", "/api/simulation/stop").await).await;
        assert_eq!(stopped["running"], false);

        let reset = send(&app, "POST", "/api/simulation/reset").await;
        assert_eq!(reset.status(), StatusCode::OK);
        let state = json_body(send(&app, "GET", "/api/simulation/state").await).await;
        assert_eq!(state["pairs"].as_array().map(Vec::len), Some(0));
        assert_eq!(state["time_step"], 0.0);
        assert_eq!(state["running"], false);
        assert_ne!(state["id"], old_id);
    }

    #[tokio::test]
    async fn when_state_is_read_then_aggregates_match_pairs() {
        let app = build_test_app();
        send(&app, "POST", "/api/pairs/create").await;
        send(&app, "POST", "/api/pairs/create?center_y=5").await;

        let state = json_body(send(&app, "GET", "/api/simulation/state").await).await;

        let pairs = state["pairs"].as_array().expect("pairs should be an array");
        let stability: f64 = pairs
            .iter()
            .filter_map(|pair| pair["stability_factor"].as_f64())
            .sum();
        let total = state["total_stability"].as_f64().expect("total should be a number");
        assert!((total - stability / pairs.len() as f64).abs() < 1e-9);
        // Fresh pairs carry |1.0| + |-1.0| each.
        let energy = state["system_energy"].as_f64().expect("energy should be a number");
        assert!((energy - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn when_control_route_is_called_with_get_then_returns_405() {
        let app = build_test_app();

        let response = send(&app, "GET", "/api/simulation/start").await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
