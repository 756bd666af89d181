//! Shares service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::shares::{
        code::{CodeSource, OsRngCodes, normalize_code},
        errors::SharesServiceError,
        models::{NewShare, ShareRecord},
        repository::{PgSharesRepository, SharesRepository},
    },
};

/// Regenerations attempted before persisting the final candidate as-is.
const MAX_COLLISION_RETRIES: u32 = 5;

#[derive(Clone)]
pub struct PgSharesService {
    repository: Arc<dyn SharesRepository>,
    codes: Arc<dyn CodeSource>,
}

impl PgSharesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: Arc::new(PgSharesRepository::new(db)),
            codes: Arc::new(OsRngCodes),
        }
    }

    #[cfg(test)]
    fn with_parts(repository: Arc<dyn SharesRepository>, codes: Arc<dyn CodeSource>) -> Self {
        Self { repository, codes }
    }
}

#[async_trait]
impl SharesService for PgSharesService {
    async fn create_share(&self, share: NewShare) -> Result<ShareRecord, SharesServiceError> {
        if share.encoded.is_empty() {
            return Err(SharesServiceError::MissingRequiredData);
        }

        let now = Timestamp::now();
        let mut code = self.codes.candidate();
        let mut attempts = 0;

        while self.repository.find_live_by_code(&code, now).await?.is_some() {
            if attempts >= MAX_COLLISION_RETRIES {
                // Persisted as-is; a duplicate code resolves to the
                // newest record on lookup.
                warn!(attempts, "share code still colliding, keeping candidate");
                break;
            }

            code = self.codes.candidate();
            attempts += 1;
        }

        let record = ShareRecord {
            uuid: Uuid::now_v7(),
            code,
            encoded: share.encoded,
            created_at: now,
            expires_at: share.expires_at,
        };

        self.repository.insert(&record).await?;

        Ok(record)
    }

    async fn get_share(&self, code: &str) -> Result<ShareRecord, SharesServiceError> {
        let code = normalize_code(code);

        self.repository
            .find_live_by_code(&code, Timestamp::now())
            .await?
            .ok_or(SharesServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait SharesService: Send + Sync {
    /// Parks an encoded cart under a newly minted code.
    ///
    /// The stored payload is opaque to the service and immutable once
    /// written.
    async fn create_share(&self, share: NewShare) -> Result<ShareRecord, SharesServiceError>;

    /// Retrieves a live share by code. Lookup is case-insensitive.
    async fn get_share(&self, code: &str) -> Result<ShareRecord, SharesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use testresult::TestResult;

    use crate::domain::shares::{
        code::{MockCodeSource, SHARE_CODE_LEN},
        repository::MockSharesRepository,
    };

    use super::*;

    fn scripted_codes(codes: &[&str]) -> MockCodeSource {
        let mut queue: VecDeque<String> = codes.iter().map(ToString::to_string).collect();
        let last = codes.last().copied().map(String::from).unwrap_or_default();

        let mut source = MockCodeSource::new();

        source
            .expect_candidate()
            .returning(move || queue.pop_front().unwrap_or_else(|| last.clone()));

        source
    }

    fn record(code: &str) -> ShareRecord {
        ShareRecord {
            uuid: Uuid::now_v7(),
            code: code.to_string(),
            encoded: "payload".to_string(),
            created_at: Timestamp::now(),
            expires_at: None,
        }
    }

    fn new_share(encoded: &str) -> NewShare {
        NewShare {
            encoded: encoded.to_string(),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn create_share_returns_generated_code() -> TestResult {
        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code()
            .once()
            .returning(|_, _| Ok(None));
        repo.expect_insert()
            .once()
            .withf(|share| share.code == "AB12CD34" && share.encoded == "payload")
            .returning(|_| Ok(()));

        let service =
            PgSharesService::with_parts(Arc::new(repo), Arc::new(scripted_codes(&["AB12CD34"])));

        let created = service.create_share(new_share("payload")).await?;

        assert_eq!(created.code, "AB12CD34");
        assert_eq!(created.code.len(), SHARE_CODE_LEN);
        assert!(created.expires_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_share_regenerates_on_collision() -> TestResult {
        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code().returning(|code, _| {
            if code == "AAAA1111" {
                Ok(Some(record("AAAA1111")))
            } else {
                Ok(None)
            }
        });
        repo.expect_insert()
            .once()
            .withf(|share| share.code == "BBBB2222")
            .returning(|_| Ok(()));

        let service = PgSharesService::with_parts(
            Arc::new(repo),
            Arc::new(scripted_codes(&["AAAA1111", "BBBB2222"])),
        );

        let created = service.create_share(new_share("payload")).await?;

        assert_eq!(created.code, "BBBB2222");

        Ok(())
    }

    #[tokio::test]
    async fn minted_code_never_duplicates_live_codes() -> TestResult {
        // A store holding three live codes, with a code source scripted
        // to collide with every one of them before producing a free code.
        let live = ["AAAA0001", "AAAA0002", "AAAA0003"];

        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code().returning(move |code, _| {
            if live.contains(&code) {
                Ok(Some(record(code)))
            } else {
                Ok(None)
            }
        });
        repo.expect_insert()
            .once()
            .withf(move |share| !live.contains(&share.code.as_str()))
            .returning(|_| Ok(()));

        let service = PgSharesService::with_parts(
            Arc::new(repo),
            Arc::new(scripted_codes(&[
                "AAAA0001", "AAAA0002", "AAAA0003", "FRESH001",
            ])),
        );

        let created = service.create_share(new_share("payload")).await?;

        assert_eq!(created.code, "FRESH001");

        Ok(())
    }

    #[tokio::test]
    async fn create_share_persists_final_candidate_after_retry_exhaustion() -> TestResult {
        let mut repo = MockSharesRepository::new();

        // Initial check plus five regenerated candidates, all colliding.
        repo.expect_find_live_by_code()
            .times(6)
            .returning(|code, _| Ok(Some(record(code))));
        repo.expect_insert()
            .once()
            .withf(|share| share.code == "CCCC3333")
            .returning(|_| Ok(()));

        let service =
            PgSharesService::with_parts(Arc::new(repo), Arc::new(scripted_codes(&["CCCC3333"])));

        let created = service.create_share(new_share("payload")).await?;

        assert_eq!(created.code, "CCCC3333");

        Ok(())
    }

    #[tokio::test]
    async fn create_share_rejects_empty_payload() {
        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code().never();
        repo.expect_insert().never();

        let service =
            PgSharesService::with_parts(Arc::new(repo), Arc::new(scripted_codes(&["AB12CD34"])));

        let result = service.create_share(new_share("")).await;

        assert!(
            matches!(result, Err(SharesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_share_uppercases_before_lookup() -> TestResult {
        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code()
            .once()
            .withf(|code, _| code == "AB12CD34")
            .returning(|code, _| Ok(Some(record(code))));

        let service = PgSharesService::with_parts(Arc::new(repo), Arc::new(scripted_codes(&[])));

        let found = service.get_share("ab12cd34").await?;

        assert_eq!(found.code, "AB12CD34");

        Ok(())
    }

    #[tokio::test]
    async fn get_share_unknown_code_returns_not_found() {
        let mut repo = MockSharesRepository::new();

        repo.expect_find_live_by_code().returning(|_, _| Ok(None));

        let service = PgSharesService::with_parts(Arc::new(repo), Arc::new(scripted_codes(&[])));

        let result = service.get_share("ZZZZZZZZ").await;

        assert!(
            matches!(result, Err(SharesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
