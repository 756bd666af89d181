//! Shares Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{database::Db, domain::shares::models::ShareRecord};

const INSERT_SHARE_SQL: &str = include_str!("sql/insert_share.sql");
const FIND_LIVE_SHARE_BY_CODE_SQL: &str = include_str!("sql/find_live_share_by_code.sql");

#[automock]
#[async_trait]
pub(crate) trait SharesRepository: Send + Sync {
    /// The newest live record under `code`, if any. Expired records are
    /// invisible.
    async fn find_live_by_code(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<Option<ShareRecord>, sqlx::Error>;

    async fn insert(&self, share: &ShareRecord) -> Result<(), sqlx::Error>;
}

#[derive(Debug, Clone)]
pub(crate) struct PgSharesRepository {
    db: Db,
}

impl PgSharesRepository {
    #[must_use]
    pub(crate) fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SharesRepository for PgSharesRepository {
    async fn find_live_by_code(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<Option<ShareRecord>, sqlx::Error> {
        query_as::<Postgres, ShareRecord>(FIND_LIVE_SHARE_BY_CODE_SQL)
            .bind(code)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(self.db.pool())
            .await
    }

    async fn insert(&self, share: &ShareRecord) -> Result<(), sqlx::Error> {
        query(INSERT_SHARE_SQL)
            .bind(share.uuid)
            .bind(&share.code)
            .bind(&share.encoded)
            .bind(SqlxTimestamp::from(share.created_at))
            .bind(share.expires_at.map(SqlxTimestamp::from))
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ShareRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            code: row.try_get("code")?,
            encoded: row.try_get("encoded")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
