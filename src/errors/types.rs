use thiserror::Error;

/// Failures surfaced by the schema bootstrapper.
///
/// No variant is recovered internally; every failure aborts the
/// remaining setup sequence and carries how many statements had already
/// been applied, so the caller can log where provisioning stopped.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Missing dependency: required table '{table}' does not exist")]
    MissingDependency { table: String },

    #[error("Insufficient privilege after {applied} setup statements: {detail}")]
    InsufficientPrivilege { applied: usize, detail: String },

    #[error("Connection failure after {applied} setup statements: {detail}")]
    Connection { applied: usize, detail: String },

    #[error("Setup statement failed after {applied} applied: {detail}")]
    Unknown { applied: usize, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BootstrapError {
    /// Number of setup statements that were applied before the failure.
    /// Precondition and configuration failures happen before any
    /// statement runs, so they report zero.
    pub fn statements_applied(&self) -> usize {
        match self {
            BootstrapError::MissingDependency { .. } | BootstrapError::Config(_) => 0,
            BootstrapError::InsufficientPrivilege { applied, .. }
            | BootstrapError::Connection { applied, .. }
            | BootstrapError::Unknown { applied, .. } => *applied,
        }
    }
}
