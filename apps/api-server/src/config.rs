//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use postdesk_core::domain::pagination::PaginationPolicy;
use postdesk_core::domain::validation::ValidationRules;
use postdesk_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` keeps every post in process memory.
    pub database: Option<DatabaseConfig>,
    pub pagination: PaginationPolicy,
    pub validation: ValidationRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            pagination: PaginationPolicy::default(),
            validation: ValidationRules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
            connect_timeout: Duration::from_secs(
                parsed(&lookup, "DB_CONNECT_TIMEOUT_SECS").unwrap_or(8),
            ),
        });

        let pagination = PaginationPolicy {
            items_per_page: parsed(&lookup, "POSTS_ITEMS_PER_PAGE")
                .unwrap_or(defaults.pagination.items_per_page),
            maximum_items_per_page: parsed(&lookup, "POSTS_MAX_ITEMS_PER_PAGE")
                .unwrap_or(defaults.pagination.maximum_items_per_page),
            client_items_per_page: flag(&lookup, "POSTS_CLIENT_ITEMS_PER_PAGE")
                .unwrap_or(defaults.pagination.client_items_per_page),
        };

        let validation = ValidationRules {
            enforce_title_min_length: flag(&lookup, "POSTS_ENFORCE_TITLE_MIN_LENGTH")
                .unwrap_or(defaults.validation.enforce_title_min_length),
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            database,
            pagination,
            validation,
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.parse().ok())
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match lookup(key)?.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
