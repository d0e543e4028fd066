#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use linkrank::domain::entities::{ClickScore, LinkId};
use linkrank::domain::repositories::{LinkRepository, RankingError, RankingRepository};
use linkrank::infrastructure::persistence::MemoryLinkRepository;
use linkrank::infrastructure::ranking::MemoryRanking;
use linkrank::routes::router;
use linkrank::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const RANKING_TIMEOUT: Duration = Duration::from_millis(500);

/// Ranking store whose backend is unreachable.
pub struct DownRanking;

#[async_trait]
impl RankingRepository for DownRanking {
    async fn increment(&self, _link_id: LinkId) -> Result<u64, RankingError> {
        Err(RankingError::unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn top_k(&self, _k: usize) -> Result<Vec<ClickScore>, RankingError> {
        Err(RankingError::unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn score(&self, _link_id: LinkId) -> Result<Option<u64>, RankingError> {
        Err(RankingError::unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn reset(&self) -> Result<(), RankingError> {
        Err(RankingError::unavailable(anyhow::anyhow!("connection refused")))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_state(
    links: Arc<dyn LinkRepository>,
    ranking: Arc<dyn RankingRepository>,
) -> AppState {
    AppState::new(links, ranking, RANKING_TIMEOUT)
}

pub fn create_memory_state() -> AppState {
    create_state(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(MemoryRanking::new()),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(server: &TestServer, code: &str, url: &str) -> i64 {
    let response = server
        .post("/api/links")
        .json(&serde_json::json!({ "code": code, "url": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["short_link_id"]
        .as_i64()
        .unwrap()
}

/// Waits until the leaderboard shows `expected` clicks for `link_id`.
///
/// Clicks are recorded in the background, so a redirect returning does not
/// mean its click has landed yet.
pub async fn wait_for_clicks(server: &TestServer, link_id: i64, expected: u64) {
    for _ in 0..200 {
        let board = server
            .get("/api/metrics")
            .add_query_param("limit", 1000)
            .await
            .json::<serde_json::Value>();

        let landed = board
            .as_array()
            .unwrap()
            .iter()
            .any(|entry| entry["link_id"] == link_id && entry["clicks"] == expected);
        if landed {
            return;
        }

        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    panic!("link {link_id} never reached {expected} clicks");
}

/// Waits until the ranking store holds `expected` clicks for `link_id`.
pub async fn wait_for_score(ranking: &dyn RankingRepository, link_id: LinkId, expected: u64) {
    for _ in 0..200 {
        if ranking.score(link_id).await.unwrap() == Some(expected) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    panic!("link {link_id} never reached score {expected}");
}
