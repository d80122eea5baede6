pub mod bootstrap;
pub mod connection;
pub mod schema;

pub use bootstrap::{apply, AppliedCount, SqlExecutor};
pub use connection::Database;
