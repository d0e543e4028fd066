mod common;

use axum::http::StatusCode;
use serde_json::json;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use linkrank::domain::entities::{ClickScore, LinkId};
use linkrank::domain::repositories::{RankingError, RankingRepository};
use linkrank::infrastructure::persistence::MemoryLinkRepository;

/// Ranking store that hangs on every increment.
struct StalledRanking;

#[async_trait]
impl RankingRepository for StalledRanking {
    async fn increment(&self, _link_id: LinkId) -> Result<u64, RankingError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(1)
    }

    async fn top_k(&self, _k: usize) -> Result<Vec<ClickScore>, RankingError> {
        Ok(Vec::new())
    }

    async fn score(&self, _link_id: LinkId) -> Result<Option<u64>, RankingError> {
        Ok(None)
    }

    async fn reset(&self) -> Result<(), RankingError> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn test_redirect_success() {
    let server = common::create_test_server(common::create_memory_state());
    common::create_test_link(&server, "redirect1", "https://example.com/target").await;

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Link not found");
}

#[tokio::test]
async fn test_redirect_not_found_leaves_ranking_untouched() {
    let server = common::create_test_server(common::create_memory_state());
    common::create_test_link(&server, "abc123", "https://example.com/a").await;

    server.get("/zzz999").await.assert_status_not_found();

    let metrics = server.get("/api/metrics").await;
    metrics.assert_status_ok();
    metrics.assert_json(&json!([]));
}

#[tokio::test]
async fn test_three_clicks_show_in_leaderboard() {
    let server = common::create_test_server(common::create_memory_state());
    let id = common::create_test_link(&server, "abc123", "https://example.com/a").await;
    assert_eq!(id, 1);

    for _ in 0..3 {
        server
            .get("/abc123")
            .await
            .assert_status(StatusCode::MOVED_PERMANENTLY);
    }
    common::wait_for_clicks(&server, id, 3).await;

    let response = server.get("/api/metrics").await;

    response.assert_status_ok();
    response.assert_json(&json!([{ "link_id": 1, "clicks": 3 }]));
}

#[tokio::test]
async fn test_redirect_succeeds_when_ranking_is_down() {
    let state = common::create_state(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(common::DownRanking),
    );
    let server = common::create_test_server(state);
    common::create_test_link(&server, "abc123", "https://example.com/a").await;

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/a");
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let server = common::create_test_server(common::create_memory_state());
    common::create_test_link(&server, "AbC123", "https://example.com/a").await;

    server.get("/abc123").await.assert_status_not_found();
    server
        .get("/AbC123")
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_redirect_does_not_wait_for_slow_ranking() {
    let state = common::create_state(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(StalledRanking),
    );
    let server = common::create_test_server(state);
    common::create_test_link(&server, "abc123", "https://example.com/a").await;

    let started = Instant::now();
    let response = server.get("/abc123").await;
    let elapsed = started.elapsed();

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert!(elapsed < Duration::from_millis(100), "redirect took {elapsed:?}");
}
