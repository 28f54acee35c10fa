//! Store location configuration.
use std::env;
use std::path::PathBuf;

/// Where the backing JSON file lives.
///
/// The resolved path is `<app_home>/Documents/<directory_name>/<file_name>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base directory; `None` means the user's home directory.
    pub app_home: Option<PathBuf>,
    pub directory_name: String,
    pub file_name: String,
}

impl StoreConfig {
    pub const DEFAULT_DIRECTORY_NAME: &'static str = "people";
    pub const DEFAULT_FILE_NAME: &'static str = "people.json";

    /// Configuration rooted at an explicit base directory.
    pub fn new(
        app_home: impl Into<PathBuf>,
        directory_name: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            app_home: Some(app_home.into()),
            directory_name: directory_name.into(),
            file_name: file_name.into(),
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PEOPLE_HOME` - Base directory (default: user home)
    /// - `PEOPLE_DIRECTORY` - Application directory under `Documents` (default: `people`)
    /// - `PEOPLE_FILE` - File name of the JSON store (default: `people.json`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(home) = read_env("PEOPLE_HOME") {
            config.app_home = Some(PathBuf::from(home));
        }
        if let Some(directory) = read_env("PEOPLE_DIRECTORY") {
            config.directory_name = directory;
        }
        if let Some(file) = read_env("PEOPLE_FILE") {
            config.file_name = file;
        }

        config
    }

    /// Resolve the full path of the backing file.
    ///
    /// Falls back to the current directory when no home directory can be
    /// determined for the user.
    pub fn file_path(&self) -> PathBuf {
        let home = self
            .app_home
            .clone()
            .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        home.join("Documents")
            .join(&self.directory_name)
            .join(&self.file_name)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_home: None,
            directory_name: Self::DEFAULT_DIRECTORY_NAME.to_string(),
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Non-empty value of an environment variable.
fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
