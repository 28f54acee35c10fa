//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use people_data::StoreConfig;

/// Configuration required to assemble the application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LogConfig,
    /// Bootstrap an empty store from the built-in seed dataset.
    pub seed: bool,
    /// Environment values that were set but could not be parsed. Logging is
    /// not installed while the configuration is read, so the caller reports
    /// these once it is.
    pub rejected: Vec<String>,
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// See [`StoreConfig::from_env`] and [`LogConfig::from_env`] for the
    /// variables they read. Additionally:
    /// - `PEOPLE_SEED` - Seed an empty store (default: true)
    pub fn from_env() -> Self {
        let mut rejected = Vec::new();
        let logging = LogConfig::read(&mut rejected);
        let seed = read_flag("PEOPLE_SEED", &mut rejected).unwrap_or(true);

        Self {
            store: StoreConfig::from_env(),
            logging,
            seed,
            rejected,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            logging: LogConfig::default(),
            seed: true,
            rejected: Vec::new(),
        }
    }
}

/// Log verbosity and sinks, passed explicitly to `logging::setup_logging`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive string, e.g. `info` or `people_data=trace`.
    pub filter: String,
    /// Also write logs to `<log_dir>/people.log`.
    pub log_to_file: bool,
    /// Directory for the log file (default: platform cache directory).
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Environment variables:
    /// - `PEOPLE_LOG` - Filter directives (default: `info`)
    /// - `PEOPLE_LOG_FILE` - Enable the file sink (default: false)
    /// - `PEOPLE_LOG_DIR` - Directory for the log file
    pub fn from_env() -> Self {
        Self::read(&mut Vec::new())
    }

    fn read(rejected: &mut Vec<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = read_env("PEOPLE_LOG") {
            config.filter = filter;
        }
        if let Some(enable) = read_flag("PEOPLE_LOG_FILE", rejected) {
            config.log_to_file = enable;
        }
        config.log_dir = read_env("PEOPLE_LOG_DIR").map(PathBuf::from);

        config
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_to_file: false,
            log_dir: None,
        }
    }
}

/// Non-empty value of an environment variable.
fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Boolean environment variable. Unparsable values are recorded in
/// `rejected` and treated as unset.
fn read_flag(key: &str, rejected: &mut Vec<String>) -> Option<bool> {
    let value = read_env(key)?;
    let flag = parse_flag(&value);
    if flag.is_none() {
        rejected.push(format!("{key}={value:?} is not a boolean; using the default"));
    }
    flag
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seed_and_log_at_info() {
        let config = AppConfig::default();
        assert!(config.seed);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.log_to_file);
        assert!(config.rejected.is_empty());
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_flag(value), Some(true), "{value}");
        }
        for value in ["0", "false", "No", "off"] {
            assert_eq!(parse_flag(value), Some(false), "{value}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_environment_overrides_and_rejections() {
        // The only test in this crate touching these variables.
        unsafe {
            env::set_var("PEOPLE_SEED", "0");
            env::set_var("PEOPLE_LOG_FILE", "sometimes");
            env::set_var("PEOPLE_LOG_DIR", "");
        }

        let config = AppConfig::from_env();

        unsafe {
            env::remove_var("PEOPLE_SEED");
            env::remove_var("PEOPLE_LOG_FILE");
            env::remove_var("PEOPLE_LOG_DIR");
        }

        assert!(!config.seed);
        assert!(!config.logging.log_to_file);
        assert_eq!(config.logging.log_dir, None);
        assert_eq!(config.rejected.len(), 1);
        assert!(config.rejected[0].starts_with("PEOPLE_LOG_FILE="));
    }
}
