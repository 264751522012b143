//! Server configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_FILE: &str = "tournaments.json";
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

/// Settings for the `web` binary.
///
/// | variable             | default            |
/// |----------------------|--------------------|
/// | `HOST`               | `0.0.0.0`          |
/// | `PORT`               | `8080`             |
/// | `DATA_FILE`          | `tournaments.json` |
/// | `MEMBERS_CSV`        | unset              |
/// | `SYNC_INTERVAL_SECS` | `60`               |
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    /// Optional CSV (`id,name,team_label`) seeding the member pool.
    pub members_csv: Option<PathBuf>,
    /// How often dirty records are re-synced in the background.
    pub sync_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            members_csv: None,
            sync_interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("PORT").and_then(|p| p.trim().parse().ok()).unwrap_or(defaults.port);
        let sync_interval = non_empty("SYNC_INTERVAL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.sync_interval);

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            data_file: non_empty("DATA_FILE").map(PathBuf::from).unwrap_or(defaults.data_file),
            members_csv: non_empty("MEMBERS_CSV").map(PathBuf::from),
            sync_interval,
        }
    }
}
