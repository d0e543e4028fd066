//! Link creation and listing service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationErrors};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkStoreError};

/// Outcomes of a failed link creation.
#[derive(Debug, Error)]
pub enum CreateLinkError {
    /// One or more fields were rejected before any store access.
    #[error("invalid link: {0}")]
    Validation(#[from] ValidationErrors),

    /// The code is already taken.
    #[error("short code `{0}` already exists")]
    DuplicateCode(String),

    /// Any other store failure.
    #[error("link store unavailable")]
    StoreUnavailable(#[source] LinkStoreError),
}

impl CreateLinkError {
    /// Names of the fields that failed validation, sorted.
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
            _ => Vec::new(),
        }
    }
}

/// Service for creating and listing short links.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Validates the input and stores a new link.
    ///
    /// Conflicts are detected by the store itself rather than by a lookup
    /// beforehand, so concurrent creations of one code cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`CreateLinkError::Validation`] if the code is shorter than 3
    /// characters or the URL is not absolute; the store is not touched.
    /// Returns [`CreateLinkError::DuplicateCode`] if the code is taken.
    /// Returns [`CreateLinkError::StoreUnavailable`] on any other store failure.
    pub async fn create_link(
        &self,
        code: impl Into<String>,
        destination_url: impl Into<String>,
    ) -> Result<Link, CreateLinkError> {
        let new_link = NewLink::new(code, destination_url);
        new_link.validate()?;

        match self.link_repository.create(new_link).await {
            Ok(link) => {
                info!(link_id = link.id, code = %link.code, "Link created");
                metrics::counter!("links_created_total").increment(1);
                Ok(link)
            }
            Err(LinkStoreError::DuplicateCode(code)) => Err(CreateLinkError::DuplicateCode(code)),
            Err(e) => {
                error!(error = ?e, "Failed to store link");
                Err(CreateLinkError::StoreUnavailable(e))
            }
        }
    }

    /// Lists every link, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkStoreError::Unavailable`] on store failures.
    pub async fn list_links(&self) -> Result<Vec<Link>, LinkStoreError> {
        self.link_repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_create_link_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        let created_link = create_test_link(1, "abc123", "https://example.com/a");
        mock_link_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code == "abc123" && new_link.destination_url == "https://example.com/a"
            })
            .times(1)
            .returning(move |_| Ok(created_link.clone()));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("abc123", "https://example.com/a")
            .await
            .unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
    }

    #[tokio::test]
    async fn test_create_link_short_code_never_reaches_store() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service
            .create_link("ab", "https://x.com")
            .await
            .unwrap_err();

        assert!(matches!(err, CreateLinkError::Validation(_)));
        assert_eq!(err.invalid_fields(), vec!["code"]);
    }

    #[tokio::test]
    async fn test_create_link_invalid_url_never_reaches_store() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service
            .create_link("abc123", "not-a-url")
            .await
            .unwrap_err();

        assert_eq!(err.invalid_fields(), vec!["destination_url"]);
    }

    #[tokio::test]
    async fn test_create_link_lists_all_invalid_fields() {
        let mock_link_repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service.create_link("x", "nope").await.unwrap_err();

        assert_eq!(err.invalid_fields(), vec!["code", "destination_url"]);
    }

    #[tokio::test]
    async fn test_create_link_duplicate_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|new_link| Err(LinkStoreError::DuplicateCode(new_link.code)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service
            .create_link("taken123", "https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, CreateLinkError::DuplicateCode(code) if code == "taken123"));
    }

    #[tokio::test]
    async fn test_create_link_store_failure_is_distinct_from_duplicate() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(LinkStoreError::unavailable(sqlx::Error::PoolTimedOut)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service
            .create_link("abc123", "https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, CreateLinkError::StoreUnavailable(_)));
        assert!(err.invalid_fields().is_empty());
    }

    #[tokio::test]
    async fn test_list_links_delegates_to_store() {
        let mut mock_link_repo = MockLinkRepository::new();

        let links = vec![
            create_test_link(2, "second", "https://example.com/2"),
            create_test_link(1, "first", "https://example.com/1"),
        ];
        mock_link_repo
            .expect_list_all()
            .times(1)
            .returning(move || Ok(links.clone()));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.list_links().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].code, "second");
        assert_eq!(result[1].code, "first");
    }
}
