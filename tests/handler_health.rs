mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use linkrank::infrastructure::persistence::MemoryLinkRepository;
use linkrank::infrastructure::ranking::MemoryRanking;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server.get("/api/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["link_store"]["status"], "ok");
    assert_eq!(json["checks"]["ranking_store"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_ranking_down() {
    let state = common::create_state(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(common::DownRanking),
    );
    let server = common::create_test_server(state);

    let response = server.get("/api/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["link_store"]["status"], "ok");
    assert_eq!(json["checks"]["ranking_store"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_ranking_on_fallback() {
    let state = common::create_state(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(MemoryRanking::stand_in()),
    );
    let server = common::create_test_server(state);

    let response = server.get("/api/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["ranking_store"]["status"], "error");
}
