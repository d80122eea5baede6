use super::types::BootstrapError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl BootstrapError {
    /// Classify this error to determine its type and whether the caller
    /// may retry the whole sequence. The bootstrapper never retries on
    /// its own; a partially applied schema is not a supported running
    /// configuration, so callers should treat non-retryable failures as
    /// fatal to startup.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable: transport may come back, the sequence is safe
            // to re-run from the top.
            BootstrapError::Connection { .. } => ErrorClassification {
                error_type: "ConnectionError",
                retryable: true,
            },

            // Non-retryable: the environment needs fixing first.
            BootstrapError::MissingDependency { .. } => ErrorClassification {
                error_type: "MissingDependencyError",
                retryable: false,
            },
            BootstrapError::InsufficientPrivilege { .. } => ErrorClassification {
                error_type: "InsufficientPrivilegeError",
                retryable: false,
            },
            BootstrapError::Unknown { .. } => ErrorClassification {
                error_type: "UnknownBootstrapError",
                retryable: false,
            },
            BootstrapError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_is_retryable() {
        let err = BootstrapError::Connection {
            applied: 0,
            detail: "connection refused".into(),
        };
        let class = err.classify();
        assert!(class.retryable);
        assert_eq!(class.error_type, "ConnectionError");
    }

    #[test]
    fn test_missing_dependency_not_retryable() {
        let err = BootstrapError::MissingDependency {
            table: "scan_results".into(),
        };
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "MissingDependencyError");
    }

    #[test]
    fn test_privilege_error_not_retryable() {
        let err = BootstrapError::InsufficientPrivilege {
            applied: 0,
            detail: "permission denied for database".into(),
        };
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_unknown_not_retryable() {
        let err = BootstrapError::Unknown {
            applied: 3,
            detail: "syntax error".into(),
        };
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "UnknownBootstrapError");
    }

    #[test]
    fn test_config_error_not_retryable() {
        let err = BootstrapError::Config("invalid config".into());
        assert!(!err.classify().retryable);
    }
}
