//! Environment-driven server configuration.
//!
//! Every setting has a default matching the original service's own
//! defaults, overridable by environment variable so the binary needs no
//! config file to start.

use std::env;

const DEFAULT_SERVER_PORT: &str = ":5000";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_DB_PATH: &str = "/tmp/custody.db";
const DEFAULT_DB_ENGINE: &str = "sled";
const DEFAULT_SCYLLA_HOSTS: &str = "localhost";

/// Which [`custody_kv::KvStore`] backend to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbEngine {
    Sled,
    Memory,
    /// Named but not built: a real Scylla driver is out of proportion to
    /// this service's storage needs (see DESIGN.md). Chosen so the
    /// `SCYLLA_HOSTS` variable still round-trips through config instead of
    /// being silently dropped.
    Scylla,
}

impl DbEngine {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "memory" => DbEngine::Memory,
            "scylla" | "scylladb" => DbEngine::Scylla,
            _ => DbEngine::Sled,
        }
    }
}

/// Server configuration, read once from the environment at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    pub log_level: String,
    pub db_path: String,
    pub db_engine: DbEngine,
    pub scylla_hosts: Vec<String>,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        let server_port = env_or("SERVER_PORT", DEFAULT_SERVER_PORT);
        let log_level = env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let db_path = env_or("DB_PATH", DEFAULT_DB_PATH);
        let db_engine = DbEngine::parse(&env_or("DB_ENGINE", DEFAULT_DB_ENGINE));
        let scylla_hosts = env_or("SCYLLA_HOSTS", DEFAULT_SCYLLA_HOSTS)
            .split(',')
            .map(str::to_string)
            .collect();

        Config {
            server_port,
            log_level,
            db_path,
            db_engine,
            scylla_hosts,
        }
    }

    /// The socket address to bind, derived from `server_port` (a Go-style
    /// `":5000"` listen address or a bare port number).
    pub fn bind_addr(&self) -> String {
        if let Some(port) = self.server_port.strip_prefix(':') {
            format!("0.0.0.0:{port}")
        } else {
            self.server_port.clone()
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}
