use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::bootstrap::{self, AppliedCount, FailureKind, SqlExecutor, StatementFailure};
use crate::config::DatabaseConfig;
use crate::errors::BootstrapError;

/// Connection handle for the scan data store. The pool is owned by the
/// caller for the lifetime of the handle; the bootstrapper takes no
/// locks and coordinates no peers.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, BootstrapError> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| BootstrapError::Connection {
                applied: 0,
                detail: format!("Failed to connect: {}", e),
            })?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the idempotent setup sequence over this connection.
    pub async fn bootstrap(&self) -> Result<AppliedCount, BootstrapError> {
        bootstrap::apply(self).await
    }

    /// Verify the database is reachable.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl SqlExecutor for Database {
    async fn execute(&self, sql: &str) -> Result<(), StatementFailure> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }

    async fn table_exists(&self, table: &str) -> Result<bool, StatementFailure> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

fn map_sqlx_error(error: sqlx::Error) -> StatementFailure {
    let kind = match &error {
        sqlx::Error::Database(db) => classify_sqlstate(db.code().as_deref()),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => FailureKind::Connection,
        _ => FailureKind::Other,
    };
    StatementFailure {
        kind,
        detail: error.to_string(),
    }
}

/// Map a SQLSTATE code onto the bootstrap failure kinds. Class 28 is
/// authorization, class 08 is connection exceptions; both mean the
/// transport or principal is unusable rather than the schema.
fn classify_sqlstate(code: Option<&str>) -> FailureKind {
    match code {
        Some("42P01") => FailureKind::UndefinedTable,
        Some("42501") => FailureKind::InsufficientPrivilege,
        Some(code) if code.starts_with("28") || code.starts_with("08") => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_undefined_table() {
        assert_eq!(classify_sqlstate(Some("42P01")), FailureKind::UndefinedTable);
    }

    #[test]
    fn test_classify_insufficient_privilege() {
        assert_eq!(
            classify_sqlstate(Some("42501")),
            FailureKind::InsufficientPrivilege
        );
    }

    #[test]
    fn test_classify_auth_and_transport_codes() {
        assert_eq!(classify_sqlstate(Some("28P01")), FailureKind::Connection);
        assert_eq!(classify_sqlstate(Some("28000")), FailureKind::Connection);
        assert_eq!(classify_sqlstate(Some("08006")), FailureKind::Connection);
    }

    #[test]
    fn test_classify_unknown_codes() {
        assert_eq!(classify_sqlstate(Some("42601")), FailureKind::Other);
        assert_eq!(classify_sqlstate(None), FailureKind::Other);
    }
}
