//! Idempotent schema bootstrap.
//!
//! The whole component is one linear batch: verify the required tables
//! exist, enable server extensions, create indexes. Every statement is
//! guarded with IF NOT EXISTS, so applying the sequence N times leaves
//! the store in the same state as applying it once. Concurrent replicas
//! may race on object creation; the store's own guards arbitrate, and
//! only the end state is guaranteed.
//!
//! Extensions run before indexes. No current index uses an extension
//! operator class, so the ordering is a convention rather than a
//! functional dependency.

use async_trait::async_trait;
use tracing::{debug, info};

use super::schema::{self, EXTENSIONS, INDEXES, REQUIRED_TABLES};
use crate::errors::BootstrapError;

/// Number of setup statements executed by a run.
pub type AppliedCount = usize;

/// How a failed statement or catalog probe should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UndefinedTable,
    InsufficientPrivilege,
    Connection,
    Other,
}

/// A classified transport-level failure reported by a [`SqlExecutor`].
#[derive(Debug)]
pub struct StatementFailure {
    pub kind: FailureKind,
    pub detail: String,
}

/// Minimal surface the bootstrapper needs from a database connection.
/// Production code implements this over a Postgres pool; tests
/// implement it over an in-memory catalog.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<(), StatementFailure>;
    async fn table_exists(&self, table: &str) -> Result<bool, StatementFailure>;
}

/// Apply the full setup sequence against the store.
///
/// Checks that every required table exists, then executes the extension
/// and index statements in fixed order. Returns the number of
/// statements executed; whether any individual statement was a no-op is
/// unobservable under the IF NOT EXISTS guard. Any failure aborts the
/// remaining sequence, and no failure is retried here.
pub async fn apply<E: SqlExecutor>(executor: &E) -> Result<AppliedCount, BootstrapError> {
    check_tables(executor).await?;

    let applied = run_capabilities(executor, 0).await?;
    let applied = run_indexes(executor, applied).await?;

    info!(applied, "schema bootstrap complete");
    Ok(applied)
}

/// Install the server extensions alone. Safe to re-run.
pub async fn ensure_capabilities<E: SqlExecutor>(
    executor: &E,
) -> Result<AppliedCount, BootstrapError> {
    run_capabilities(executor, 0).await
}

/// Create the secondary indexes alone. Assumes the target tables exist;
/// a table missing at this point surfaces as a missing dependency.
pub async fn create_indexes<E: SqlExecutor>(executor: &E) -> Result<AppliedCount, BootstrapError> {
    run_indexes(executor, 0).await
}

async fn check_tables<E: SqlExecutor>(executor: &E) -> Result<(), BootstrapError> {
    for table in REQUIRED_TABLES {
        let exists = executor
            .table_exists(table)
            .await
            .map_err(|failure| escalate(failure, 0, None))?;
        if !exists {
            return Err(BootstrapError::MissingDependency {
                table: (*table).to_string(),
            });
        }
    }
    Ok(())
}

async fn run_capabilities<E: SqlExecutor>(
    executor: &E,
    mut applied: usize,
) -> Result<usize, BootstrapError> {
    for extension in EXTENSIONS {
        let sql = schema::extension_sql(extension);
        executor
            .execute(&sql)
            .await
            .map_err(|failure| escalate(failure, applied, None))?;
        applied += 1;
        debug!(statement = %sql, "applied");
    }
    Ok(applied)
}

async fn run_indexes<E: SqlExecutor>(
    executor: &E,
    mut applied: usize,
) -> Result<usize, BootstrapError> {
    for index in INDEXES {
        let sql = index.create_sql();
        executor
            .execute(&sql)
            .await
            .map_err(|failure| escalate(failure, applied, Some(index.table)))?;
        applied += 1;
        debug!(statement = %sql, "applied");
    }
    Ok(applied)
}

/// Escalate a classified transport failure into the bootstrap taxonomy,
/// attaching how far the sequence got.
fn escalate(failure: StatementFailure, applied: usize, table: Option<&str>) -> BootstrapError {
    match failure.kind {
        FailureKind::UndefinedTable => match table {
            // A table that passed the precondition check vanished
            // mid-sequence.
            Some(table) => BootstrapError::MissingDependency {
                table: table.to_string(),
            },
            None => BootstrapError::Unknown {
                applied,
                detail: failure.detail,
            },
        },
        FailureKind::InsufficientPrivilege => BootstrapError::InsufficientPrivilege {
            applied,
            detail: failure.detail,
        },
        FailureKind::Connection => BootstrapError::Connection {
            applied,
            detail: failure.detail,
        },
        FailureKind::Other => BootstrapError::Unknown {
            applied,
            detail: failure.detail,
        },
    }
}
