use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://db/watchparty.sqlite3".to_owned(),
            db_max_connections: 16,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Reads the environment, with `.env` loaded first by `dotenv`.
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Unset variables keep their defaults; set but malformed ones are errors.
    pub fn from_lookup<F>(var: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(v) = var("DB_MAX_CONNECTIONS") {
            config.db_max_connections = v
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS={v} is not a number"))?;
        }
        if let Some(v) = var("BIND_ADDR") {
            config.bind_addr = v
                .parse()
                .with_context(|| format!("BIND_ADDR={v} is not a socket address"))?;
        }
        if let Some(dir) = var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://db/watchparty.sqlite3");
        assert_eq!(config.db_max_connections, 16);
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("STATIC_DIR", "/srv/client"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.db_max_connections, 4);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("/srv/client"));
    }

    #[test]
    fn bad_max_connections() {
        let err = load(&[("DB_MAX_CONNECTIONS", "abc")]).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS=abc"), "{err}");
    }

    #[test]
    fn bad_bind_addr() {
        let err = load(&[("BIND_ADDR", "nonsense")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR=nonsense"), "{err}");
    }
}
