use std::env;

use dotenvy::dotenv;

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5555";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
}

impl Config {
    /// Reads `DATABASE_URL` and `BIND_ADDRESS`, loading `.env` first if present.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address: non_empty("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.bind_address, "0.0.0.0:5555");
    }

    #[test]
    fn test_reads_variables() {
        let vars = HashMap::from([
            ("DATABASE_URL", "sqlite:///var/lib/pizza/app.db"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url, "sqlite:///var/lib/pizza/app.db");
        assert_eq!(config.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_blank_database_url_falls_back() {
        let config = Config::from_lookup(|key| (key == "DATABASE_URL").then(|| "  ".to_string()));

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }
}
