//! Service configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://not_twitter.db";

/// API key seeded when no seed file is configured.
pub const DEFAULT_SEED_API_KEY: &str = "test";

/// Display name of the default seeded user.
pub const DEFAULT_SEED_USER_NAME: &str = "Test User";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Database connection string (default: `sqlite://not_twitter.db`).
    pub database_url: String,

    /// Maximum pooled database connections (default: 5).
    pub database_max_connections: u32,

    /// API key to display name pairs seeded at startup.
    pub seed_users: BTreeMap<String, String>,

    /// Directory of a static frontend served for unmatched paths (optional).
    pub static_dir: Option<PathBuf>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `SEED_USERS_FILE` was set but could not be loaded.
    #[error("failed to load seed users from {path}: {source}")]
    SeedFile {
        /// The configured path.
        path: String,
        /// Underlying read or parse error.
        #[source]
        source: std::io::Error,
    },
}

impl ServiceConfig {
    /// Load configuration from environment variables and the seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEED_USERS_FILE` is set but cannot be read or parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            seed_users: seed_users_from(std::env::var("SEED_USERS_FILE").ok())?,
            static_dir: std::env::var("STATIC_DIR").ok().map(PathBuf::from),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024), // 10MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// The seed mapping used when `SEED_USERS_FILE` is not set.
#[must_use]
pub fn default_seed_users() -> BTreeMap<String, String> {
    BTreeMap::from([(
        DEFAULT_SEED_API_KEY.to_string(),
        DEFAULT_SEED_USER_NAME.to_string(),
    )])
}

/// Load seed users from the configured file, or fall back to the default pair.
fn seed_users_from(path: Option<String>) -> Result<BTreeMap<String, String>, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("SEED_USERS_FILE not set, seeding default user");
        return Ok(default_seed_users());
    };

    let users = load_seed_file(&path).map_err(|source| ConfigError::SeedFile {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path, count = users.len(), "Loaded seed users from file");
    Ok(users)
}

/// Load a JSON object of `api_key -> name` pairs.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object of strings.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>, std::io::Error> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            database_max_connections: 5,
            seed_users: default_seed_users(),
            static_dir: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 10 * 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_seed_file_reads_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"key_1": "Alice", "key_2": "Bob"}}"#).unwrap();

        let users = load_seed_file(file.path()).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users["key_1"], "Alice");
        assert_eq!(users["key_2"], "Bob");
    }

    #[test]
    fn load_seed_file_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["key_1", "Alice"]"#).unwrap();

        let err = load_seed_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn load_seed_file_missing_path() {
        let err = load_seed_file("/nonexistent/seed.json").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn unset_seed_file_uses_default_user() {
        let users = seed_users_from(None).unwrap();
        assert_eq!(users, default_seed_users());
    }

    #[test]
    fn unreadable_seed_file_is_an_error() {
        let err = seed_users_from(Some("/nonexistent/seed.json".into())).unwrap_err();
        let ConfigError::SeedFile { path, source } = err;
        assert_eq!(path, "/nonexistent/seed.json");
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(matches!(
            seed_users_from(Some(path)),
            Err(ConfigError::SeedFile { .. })
        ));
    }

    #[test]
    fn default_config_seeds_test_user() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.seed_users.get(DEFAULT_SEED_API_KEY).map(String::as_str),
            Some(DEFAULT_SEED_USER_NAME)
        );
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }
}
