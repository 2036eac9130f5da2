pub mod aggregate;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod normalize;
pub mod paranagua;
pub mod persist;
pub mod record;
pub mod santos;

pub use record::{CanonicalRecord, Direction, Port, RawRow};

use std::path::Path;

/// Create a headless Chrome browser instance.
/// Automatically disables sandbox when running inside a container
/// (detected via /.dockerenv or PORT_LINEUP_CONTAINER env var).
/// Dropping the returned Browser kills the Chrome process.
pub fn create_browser(chrome_path: Option<&Path>) -> anyhow::Result<headless_chrome::Browser> {
    let is_container = std::env::var("PORT_LINEUP_CONTAINER").is_ok()
        || Path::new("/.dockerenv").exists();

    if !is_container && chrome_path.is_none() {
        return headless_chrome::Browser::default()
            .map_err(|e| anyhow::anyhow!("Failed to launch headless Chrome: {}", e));
    }

    let options = headless_chrome::LaunchOptions::default_builder()
        .sandbox(!is_container)
        .path(chrome_path.map(Path::to_path_buf))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build Chrome launch options: {}", e))?;
    headless_chrome::Browser::new(options)
        .map_err(|e| anyhow::anyhow!("Failed to launch headless Chrome: {}", e))
}
