use std::path::Path;
use crate::errors::BootstrapError;
use super::types::DatabaseConfig;
use tracing::debug;

pub async fn parse_config(path: &Path) -> Result<DatabaseConfig, BootstrapError> {
    if !path.exists() {
        return Err(BootstrapError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BootstrapError::Config(format!("Failed to read config: {}", e)))?;

    let mut config: DatabaseConfig = serde_yaml::from_str(&content)
        .map_err(|e| BootstrapError::Config(format!("Invalid config: {}", e)))?;

    config.database_url = resolve_env(&config.database_url);
    config.validate()?;

    Ok(config)
}

/// Resolve a config value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved value from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}
