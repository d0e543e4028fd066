//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkStoreError};

/// Name of the UNIQUE constraint on `short_links.code`.
const CODE_UNIQUE_CONSTRAINT: &str = "short_links_code_key";

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness is enforced by the `short_links_code_key` constraint, so
/// concurrent inserts of the same code are serialized by the database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.code, row.original_url, row.created_at)
    }
}

/// Returns true if the error is a violation of the code uniqueness constraint.
fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkStoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO short_links (code, original_url)
            VALUES ($1, $2)
            RETURNING id, code, original_url, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.destination_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                LinkStoreError::DuplicateCode(new_link.code.clone())
            } else {
                LinkStoreError::unavailable(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkStoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, created_at
            FROM short_links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(LinkStoreError::unavailable)?;

        Ok(row.map(Link::from))
    }

    async fn list_all(&self) -> Result<Vec<Link>, LinkStoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, created_at
            FROM short_links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(LinkStoreError::unavailable)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
