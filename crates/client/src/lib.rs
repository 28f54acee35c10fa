//! Headless client for the people store.
//!
//! # Architecture
//!
//! ```text
//! App (composition root)
//!   ├─→ DataStore (JSON file, snapshot channel)
//!   └─→ PersonViewModel (UI state + error events)
//!         ├─→ PeopleRepository (CRUD facade over the store)
//!         ├─→ PeopleScreen
//!         └─→ PersonScreen
//! ```
//!
//! Every layer is injected through [`AppBuilder`]; screens only talk to the
//! view model.

mod builder;
pub mod config;
pub mod logging;
pub mod ui;

pub use builder::AppBuilder;
pub use config::{AppConfig, LogConfig};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use people_data::DataStore;

use crate::ui::{PeopleScreen, PersonScreen, PersonViewModel};

/// Record shown on the detail screen during [`App::run`].
pub const DEMO_PERSON_ID: &str = "01000000-0000-0000-0000-000000000000";

/// Assembled application.
pub struct App {
    pub store: Arc<dyn DataStore>,
    pub view_model: Arc<PersonViewModel>,
    screen_delay: Duration,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Run the screen sequence.
    ///
    /// 1. Initialize the store (seeding it when the file is missing or empty)
    /// 2. Show the people screen
    /// 3. Switch to the person screen for [`DEMO_PERSON_ID`]
    /// 4. Wait for `shutdown`, then cancel all view model work
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        println!("Using DataStore {}", self.store.file_path().display());

        self.store
            .initialize()
            .await
            .context("Failed to initialize the people store")?;

        let mut people_screen = PeopleScreen::new(Arc::clone(&self.view_model));
        let mut person_screen = PersonScreen::new(Arc::clone(&self.view_model));

        tracing::debug!("Showing PeopleScreen");
        people_screen.start_observer();
        tokio::time::sleep(self.screen_delay).await;
        people_screen.stop_observer();

        tracing::debug!("Showing PersonScreen for {}", DEMO_PERSON_ID);
        person_screen.start_observer();
        self.view_model.fetch_by_id(DEMO_PERSON_ID);
        tokio::time::sleep(self.screen_delay).await;
        person_screen.stop_observer();

        println!("Press ENTER to terminate");
        shutdown.await;

        self.view_model.on_cleared();
        tracing::info!("View model cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use people_core::Seed;
    use people_data::StoreConfig;
    use tempfile::TempDir;

    use super::*;

    fn config(temp_dir: &TempDir) -> AppConfig {
        AppConfig {
            store: StoreConfig::new(temp_dir.path(), "people", "people.json"),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_build_requires_config() {
        let err = App::builder().build().err().expect("config is required");
        assert!(err.to_string().contains("AppConfig is required"));
    }

    #[tokio::test]
    async fn test_run_seeds_store_and_clears_view_model() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::builder()
            .config(config(&temp_dir))
            .screen_delay(Duration::from_millis(10))
            .build()
            .unwrap();
        let store = Arc::clone(&app.store);
        let view_model = Arc::clone(&app.view_model);

        app.run(async {}).await.unwrap();

        assert_eq!(
            store.find_by_id(DEMO_PERSON_ID).await.map(|p| p.first_name),
            Some("Arne".to_string())
        );
        let text = fs::read_to_string(store.file_path()).unwrap();
        let on_disk: Vec<people_core::Person> = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk, Seed::new().people());
        assert_eq!(view_model.person_state().borrow().person.id, DEMO_PERSON_ID);
    }

    #[tokio::test]
    async fn test_run_without_seed_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::builder()
            .config(AppConfig {
                seed: false,
                ..config(&temp_dir)
            })
            .screen_delay(Duration::from_millis(10))
            .build()
            .unwrap();
        let store = Arc::clone(&app.store);

        app.run(async {}).await.unwrap();

        assert!(store.find_by_id(DEMO_PERSON_ID).await.is_none());
        assert_eq!(fs::read_to_string(store.file_path()).unwrap().trim(), "[]");
    }
}
