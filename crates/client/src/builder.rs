//! Application builder with dependency injection pattern.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use people_core::Seed;
use people_data::{DataStore, FileDataStore, PeopleRepository, PersonRepository};

use crate::App;
use crate::config::AppConfig;
use crate::ui::PersonViewModel;

const DEFAULT_SCREEN_DELAY: Duration = Duration::from_secs(2);

/// Wires store, repository, and view model into an [`App`].
///
/// The configuration is required. A prebuilt store replaces the JSON file
/// store described by the configuration.
#[derive(Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
    store: Option<Arc<dyn DataStore>>,
    screen_delay: Option<Duration>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (required).
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `store` instead of the file store from the configuration.
    pub fn store(mut self, store: Arc<dyn DataStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// How long each screen stays up during [`App::run`] (default: 2s).
    pub fn screen_delay(mut self, delay: Duration) -> Self {
        self.screen_delay = Some(delay);
        self
    }

    /// Build the App.
    ///
    /// Must be called inside a Tokio runtime: the view model starts
    /// observing the store immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not set.
    pub fn build(self) -> Result<App> {
        let config = self
            .config
            .context("AppConfig is required. Use .config() to set it.")?;

        let store: Arc<dyn DataStore> = match self.store {
            Some(store) => store,
            None => {
                let seed = config.seed.then(Seed::new);
                Arc::new(FileDataStore::from_config(&config.store, seed))
            }
        };

        let repository: Arc<dyn PeopleRepository> =
            Arc::new(PersonRepository::new(Arc::clone(&store)));
        let view_model = Arc::new(PersonViewModel::new(repository));

        Ok(App {
            store,
            view_model,
            screen_delay: self.screen_delay.unwrap_or(DEFAULT_SCREEN_DELAY),
        })
    }
}
