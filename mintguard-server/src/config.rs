//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::time::Duration;

use mintguard_core::{
    MatcherConfig, DEFAULT_BUDGET, DEFAULT_CANDIDATE_LIMIT, DEFAULT_MAX_RESULTS,
    DEFAULT_THRESHOLD,
};

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 3000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: [u8; 4],
    /// Allowed CORS origins, comma-separated (default: allow all in dev)
    pub allowed_origins: Option<Vec<String>>,
    /// Request body limit in MB (default: 50)
    pub body_limit_mb: usize,
    /// Maximum file size per upload in MB (default: 25)
    pub max_file_size_mb: usize,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Enable rate limiting (default: false for tests, true when loaded from env)
    pub rate_limit_enabled: bool,
    /// Rate limit: requests per second (default: 10)
    pub rate_limit_per_sec: u64,
    /// Rate limit: burst size (default: 20)
    pub rate_limit_burst: u32,
    /// Catalog database URL (in-memory empty catalog when unset)
    pub database_url: Option<String>,
    /// Database connection pool maximum connections (default: 20)
    pub database_max_connections: u32,
    /// Database connection pool minimum connections (default: 2)
    pub database_min_connections: u32,
    /// Minimum similarity score reported by the gate (default: 0.86)
    pub match_threshold: f64,
    /// Catalog entries scanned per check (default: 500)
    pub match_candidate_limit: usize,
    /// Matches returned per check (default: 12)
    pub match_max_results: usize,
    /// Wall-clock budget per check in seconds (default: 12)
    pub match_budget_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            host: [127, 0, 0, 1],
            allowed_origins: None, // None = allow all (dev mode)
            body_limit_mb: 50,
            max_file_size_mb: 25,
            timeout_secs: 30,
            rate_limit_enabled: false, // Disabled by default (for tests)
            rate_limit_per_sec: 10,
            rate_limit_burst: 20,
            database_url: None,
            database_max_connections: 20,
            database_min_connections: 2,
            match_threshold: DEFAULT_THRESHOLD,
            match_candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            match_max_results: DEFAULT_MAX_RESULTS,
            match_budget_secs: DEFAULT_BUDGET.as_secs(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST")
            .ok()
            .map(|h| {
                if h == "0.0.0.0" {
                    [0, 0, 0, 0]
                } else {
                    [127, 0, 0, 1]
                }
            })
            .unwrap_or(defaults.host);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Rate limiting enabled by default in production, can be disabled with RATE_LIMIT_ENABLED=false
        let rate_limit_enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            port: env_parse("PORT").unwrap_or(defaults.port),
            host,
            allowed_origins,
            body_limit_mb: env_parse("BODY_LIMIT_MB").unwrap_or(defaults.body_limit_mb),
            max_file_size_mb: env_parse("MAX_FILE_SIZE_MB").unwrap_or(defaults.max_file_size_mb),
            timeout_secs: env_parse("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            rate_limit_enabled,
            rate_limit_per_sec: env_parse("RATE_LIMIT_PER_SEC")
                .unwrap_or(defaults.rate_limit_per_sec),
            rate_limit_burst: env_parse("RATE_LIMIT_BURST").unwrap_or(defaults.rate_limit_burst),
            database_url,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            database_min_connections: env_parse("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(defaults.database_min_connections),
            match_threshold: env_parse("MATCH_THRESHOLD").unwrap_or(defaults.match_threshold),
            match_candidate_limit: env_parse("MATCH_CANDIDATE_LIMIT")
                .unwrap_or(defaults.match_candidate_limit),
            match_max_results: env_parse("MATCH_MAX_RESULTS")
                .unwrap_or(defaults.match_max_results),
            match_budget_secs: env_parse("MATCH_BUDGET_SECS")
                .unwrap_or(defaults.match_budget_secs),
        }
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    /// Maximum accepted upload size in bytes
    pub fn max_file_size(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Matcher tuning derived from the `MATCH_*` settings.
    ///
    /// Out-of-range values are clamped: the threshold into `[0, 1]` (NaN falls
    /// back to the default), limits and budget to at least 1.
    pub fn matcher_config(&self) -> MatcherConfig {
        let threshold = if self.match_threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            self.match_threshold.clamp(0.0, 1.0)
        };

        MatcherConfig {
            threshold,
            candidate_limit: self.match_candidate_limit.max(1),
            max_results: self.match_max_results.max(1),
            budget: Duration::from_secs(self.match_budget_secs.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert!(!config.rate_limit_enabled);
        assert_eq!(config.max_file_size(), 25 * 1024 * 1024);
    }

    #[test]
    fn test_default_matcher_config() {
        let matcher = Config::default().matcher_config();
        assert_eq!(matcher, MatcherConfig::default());
        assert_eq!(matcher.threshold, 0.86);
        assert_eq!(matcher.candidate_limit, 500);
        assert_eq!(matcher.max_results, 12);
        assert_eq!(matcher.budget, Duration::from_secs(12));
    }

    #[test]
    fn test_matcher_config_clamps() {
        let config = Config {
            match_threshold: 1.5,
            match_candidate_limit: 0,
            match_max_results: 0,
            match_budget_secs: 0,
            ..Config::default()
        };
        let matcher = config.matcher_config();
        assert_eq!(matcher.threshold, 1.0);
        assert_eq!(matcher.candidate_limit, 1);
        assert_eq!(matcher.max_results, 1);
        assert_eq!(matcher.budget, Duration::from_secs(1));

        let nan = Config {
            match_threshold: f64::NAN,
            ..Config::default()
        };
        assert_eq!(nan.matcher_config().threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_socket_addr() {
        let config = Config {
            host: [0, 0, 0, 0],
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }
}
