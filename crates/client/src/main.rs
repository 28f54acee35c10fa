//! `people` binary.
//!
//! Composition root: loads configuration, installs logging, assembles the
//! [`App`](people_client::App) and runs the screen sequence until ENTER.
//!
//! ```bash
//! PEOPLE_HOME=/tmp/demo PEOPLE_LOG=debug cargo run -p people-client
//! ```

use anyhow::Result;
use people_client::{App, AppConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = AppConfig::from_env();

    // 2. Setup logging
    let _logging = logging::setup_logging(&config.logging)?;
    tracing::info!("Starting people client");
    for rejected in &config.rejected {
        tracing::warn!("Ignoring environment value: {}", rejected);
    }
    tracing::debug!("Store: {:?}", config.store);
    tracing::debug!("Seed: {}", config.seed);

    // 3. Wire store, repository and view model
    let app = App::builder().config(config).build()?;

    // 4. Run until the user presses ENTER
    app.run(wait_for_enter()).await?;

    tracing::info!("People client shutdown complete");
    Ok(())
}

async fn wait_for_enter() {
    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await;

    match read {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("Failed to read stdin: {}", e),
        Err(e) => tracing::warn!("Stdin reader failed: {}", e),
    }
}
