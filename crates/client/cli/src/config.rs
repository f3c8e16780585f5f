//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one terminal session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory with `config.toml`, `items.ron` and `world.ron`; the bundled
    /// data is used when unset.
    pub data_dir: Option<PathBuf>,
    /// World seed; defaults to the wall clock.
    pub seed: Option<u64>,
    pub session_id: Option<String>,
    /// Interval between simulation ticks.
    pub frame: Duration,
    /// How long a direction stays held after its last key event.
    pub hold: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            session_id: None,
            frame: Duration::from_millis(Self::DEFAULT_FRAME_MS),
            hold: Duration::from_millis(Self::DEFAULT_HOLD_MS),
        }
    }
}

impl CliConfig {
    pub const DEFAULT_FRAME_MS: u64 = 33;
    pub const DEFAULT_HOLD_MS: u64 = 140;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHARTER_DATA_DIR` - Content directory (default: bundled data)
    /// - `CHARTER_SEED` - World seed (default: current time)
    /// - `CHARTER_SESSION_ID` - Session identifier for the log directory (default: auto-generated)
    /// - `CHARTER_FRAME_MS` - Tick interval in milliseconds (default: 33)
    /// - `CHARTER_HOLD_MS` - Key hold window in milliseconds (default: 140)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.data_dir = read("CHARTER_DATA_DIR").map(PathBuf::from);
        config.seed = read("CHARTER_SEED").and_then(|value| value.trim().parse().ok());
        config.session_id = read("CHARTER_SESSION_ID");

        let read_ms = |key: &str| read(key).and_then(|value| value.trim().parse::<u64>().ok());
        if let Some(ms) = read_ms("CHARTER_FRAME_MS") {
            config.frame = Duration::from_millis(ms.clamp(5, 250));
        }
        if let Some(ms) = read_ms("CHARTER_HOLD_MS") {
            config.hold = Duration::from_millis(ms.max(1));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert!(config.data_dir.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.frame, Duration::from_millis(CliConfig::DEFAULT_FRAME_MS));
        assert_eq!(config.hold, Duration::from_millis(CliConfig::DEFAULT_HOLD_MS));
    }

    #[test]
    fn reads_and_clamps_values() {
        let config = config_from(&[
            ("CHARTER_DATA_DIR", "/srv/charter"),
            ("CHARTER_SEED", " 42 "),
            ("CHARTER_SESSION_ID", "demo"),
            ("CHARTER_FRAME_MS", "1"),
            ("CHARTER_HOLD_MS", "200"),
        ]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/charter")));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.session_id.as_deref(), Some("demo"));
        assert_eq!(config.frame, Duration::from_millis(5));
        assert_eq!(config.hold, Duration::from_millis(200));
    }

    #[test]
    fn ignores_garbage() {
        let config = config_from(&[("CHARTER_SEED", "soon"), ("CHARTER_FRAME_MS", "")]);
        assert!(config.seed.is_none());
        assert_eq!(config.frame, Duration::from_millis(CliConfig::DEFAULT_FRAME_MS));
    }
}
