//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;

/// Settings for one client run.
///
/// Environment variables:
/// - `WAYFARER_CONFIG` - path to a game config TOML file
/// - `WAYFARER_DATA_DIR` - content directory (`config.toml`, `items.ron`, `areas/`)
/// - `WAYFARER_SEED` - session seed, overrides the config file
/// - `WAYFARER_FPS` - simulated frames per second (default: 60)
/// - `WAYFARER_LOG_DIR` - log root (default: the platform cache directory)
/// - `WAYFARER_SESSION_ID` - log subdirectory name (default: `session_<unix time>`)
/// - `WAYFARER_HOLD_MS` - how long a key counts as held without a release
///   event, on terminals that do not report releases (default: 150)
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub fps: u32,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub hold: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            data_dir: None,
            seed: None,
            fps: RuntimeConfig::DEFAULT_FPS,
            log_dir: None,
            session_id: None,
            hold: Duration::from_millis(Self::DEFAULT_HOLD_MS),
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_HOLD_MS: u64 = 150;

    /// Construct client configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparsable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self {
            config_path: read("WAYFARER_CONFIG").map(PathBuf::from),
            data_dir: read("WAYFARER_DATA_DIR").map(PathBuf::from),
            seed: read("WAYFARER_SEED").and_then(|value| parse_value(&value)),
            log_dir: read("WAYFARER_LOG_DIR").map(PathBuf::from),
            session_id: read("WAYFARER_SESSION_ID"),
            ..Self::default()
        };

        if let Some(fps) = read("WAYFARER_FPS").and_then(|value| parse_value::<u32>(&value)) {
            config.fps = fps.clamp(1, 240);
        }
        if let Some(hold) = read("WAYFARER_HOLD_MS").and_then(|value| parse_value::<u64>(&value)) {
            config.hold = Duration::from_millis(hold.max(1));
        }

        config
    }
}

fn parse_value<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    value.trim().parse().ok()
}
