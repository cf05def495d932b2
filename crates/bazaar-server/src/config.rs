use std::path::PathBuf;

use anyhow::{Context, Result};
use bazaar_services::pagination::DEFAULT_PAGE_SIZE;

/// Server settings, read from `BAZAAR_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("BAZAAR_DB_PATH").unwrap_or_else(|| "bazaar.db".into());
        let host = lookup("BAZAAR_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("BAZAAR_PORT") {
            Some(raw) => raw.parse::<u16>().with_context(|| format!("BAZAAR_PORT '{}' is not a port", raw))?,
            None => 3000,
        };
        let page_size = match lookup("BAZAAR_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("BAZAAR_PAGE_SIZE '{}' is not a number", raw))?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("bazaar.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[("BAZAAR_PORT", "8080"), ("BAZAAR_PAGE_SIZE", "50")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn rejects_garbage_port() {
        assert!(config(&[("BAZAAR_PORT", "eighty")]).is_err());
    }
}
