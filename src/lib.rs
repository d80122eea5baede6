//! Schema bootstrap for the scan-results and audit data store.
//!
//! The store's tables (`scan_results`, `audit_logs`, `source_analysis`,
//! `directory_enum`) are provisioned by external tooling. This crate
//! prepares everything around them: it installs the server extensions
//! the store relies on and creates the secondary indexes, as a single
//! idempotent batch that environment setup can re-run safely.

pub mod config;
pub mod db;
pub mod errors;

pub use config::DatabaseConfig;
pub use db::bootstrap::{apply, AppliedCount, SqlExecutor};
pub use db::Database;
pub use errors::{BootstrapError, ErrorClassification};
