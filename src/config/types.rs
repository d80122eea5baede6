use serde::{Deserialize, Serialize};

use crate::errors::BootstrapError;

/// Connection settings for the scan data store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_database_url() -> String {
    "postgres://localhost/scanstore".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Build a config from the environment. `DATABASE_URL` overrides the
    /// default URL; pool settings keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.database_url = url;
            }
        }
        config
    }

    /// Reject settings the store cannot work with. The URL itself is not
    /// echoed in errors since it may embed credentials.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(BootstrapError::Config(
                "database_url must use the postgres:// or postgresql:// scheme".into(),
            ));
        }
        if self.max_connections == 0 {
            return Err(BootstrapError::Config(
                "max_connections must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
