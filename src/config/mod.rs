pub mod parser;
pub mod types;

pub use types::DatabaseConfig;
pub use parser::{parse_config, resolve_env};
