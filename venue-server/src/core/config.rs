//! Server configuration

/// Configuration for the booking backend
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the catalog and ledger databases
    pub work_dir: String,
    pub http_port: u16,
    pub environment: String,
    /// Optional log directory (daily-rolling files when set)
    pub log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/venue/server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Path of the embedded catalog database
    pub fn catalog_db_path(&self) -> String {
        format!("{}/catalog.db", self.work_dir)
    }

    /// Path of the ledger database
    pub fn ledger_db_path(&self) -> String {
        format!("{}/ledger.redb", self.work_dir)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_paths_derive_from_work_dir() {
        let config = Config {
            work_dir: "/tmp/venue".into(),
            http_port: 3000,
            environment: "test".into(),
            log_dir: None,
        };
        assert_eq!(config.catalog_db_path(), "/tmp/venue/catalog.db");
        assert_eq!(config.ledger_db_path(), "/tmp/venue/ledger.redb");
    }
}
