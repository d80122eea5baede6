//! Declarative setup catalog for the data store.
//!
//! Tables are provisioned by external tooling; the bootstrapper only
//! installs server extensions and secondary indexes on top of them.
//! Every statement rendered here is a create-if-absent, so the full
//! catalog can be re-applied any number of times.

/// Server extensions the store relies on. Installed if absent, never
/// removed.
pub const EXTENSIONS: &[&str] = &["uuid-ossp", "pg_trgm"];

/// Tables that must already exist before the catalog is applied.
pub const REQUIRED_TABLES: &[&str] = &[
    "scan_results",
    "audit_logs",
    "source_analysis",
    "directory_enum",
];

/// A single-column secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

/// Index set, in application order.
pub const INDEXES: &[IndexSpec] = &[
    IndexSpec {
        name: "idx_scan_results_target_url",
        table: "scan_results",
        column: "target_url",
    },
    IndexSpec {
        name: "idx_scan_results_created_at",
        table: "scan_results",
        column: "created_at",
    },
    IndexSpec {
        name: "idx_scan_results_vulnerability_type",
        table: "scan_results",
        column: "vulnerability_type",
    },
    IndexSpec {
        name: "idx_audit_logs_created_at",
        table: "audit_logs",
        column: "created_at",
    },
    IndexSpec {
        name: "idx_source_analysis_target_url",
        table: "source_analysis",
        column: "target_url",
    },
    IndexSpec {
        name: "idx_directory_enum_target_url",
        table: "directory_enum",
        column: "target_url",
    },
];

/// Total number of statements a full bootstrap run executes.
pub const STATEMENT_COUNT: usize = EXTENSIONS.len() + INDEXES.len();

impl IndexSpec {
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            self.name, self.table, self.column
        )
    }
}

pub fn extension_sql(extension: &str) -> String {
    format!("CREATE EXTENSION IF NOT EXISTS \"{}\"", extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_statement_count_covers_full_catalog() {
        assert_eq!(STATEMENT_COUNT, 8);
    }

    #[test]
    fn test_index_names_are_unique() {
        let names: HashSet<&str> = INDEXES.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), INDEXES.len());
    }

    #[test]
    fn test_indexes_only_touch_required_tables() {
        for index in INDEXES {
            assert!(
                REQUIRED_TABLES.contains(&index.table),
                "index {} targets unlisted table {}",
                index.name,
                index.table
            );
        }
    }

    #[test]
    fn test_every_required_table_is_indexed() {
        for table in REQUIRED_TABLES {
            assert!(INDEXES.iter().any(|i| i.table == *table));
        }
    }

    #[test]
    fn test_extension_sql_is_guarded_and_quoted() {
        assert_eq!(
            extension_sql("uuid-ossp"),
            "CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\""
        );
    }

    #[test]
    fn test_index_sql_is_guarded() {
        let sql = INDEXES[0].create_sql();
        assert_eq!(
            sql,
            "CREATE INDEX IF NOT EXISTS idx_scan_results_target_url ON scan_results(target_url)"
        );
    }
}
