use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use model::DatasetLoader;
use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Name of the optional settings file, looked up in the working directory
pub const SETTINGS_FILE: &str = "ecomdash";

/// Runtime tunables.
///
/// Read from `ecomdash.toml` (optional) and `ECOMDASH__*` environment
/// variables, e.g. `ECOMDASH__CACHE_TTL_SECS=60`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of cached view results
    pub cache_capacity: u64,
    /// Lifetime of a cached view result
    pub cache_ttl_secs: u64,
    /// Requests running longer than this are aborted
    pub request_timeout_secs: u64,
    /// Rows returned by ranked views when no limit is given
    pub top_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl_secs: 300, // 5 minutes
            request_timeout_secs: 30,
            top_limit: compute::products::DEFAULT_TOP_LIMIT,
        }
    }
}

/// Load settings from the optional settings file and the environment
pub fn load_settings() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings: Settings = Config::builder()
        .add_source(File::with_name(SETTINGS_FILE).required(false))
        .add_source(Environment::with_prefix("ECOMDASH").separator("__"))
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Failed to parse settings")?;

    debug!(?settings, "Settings loaded");
    Ok(settings)
}

/// Initialize application state: load the dataset and build the view cache
pub async fn initialize_app_state(data_dir: &Path, settings: Settings) -> Result<AppState> {
    info!("Loading dataset from {}", data_dir.display());

    let loader = DatasetLoader::new(data_dir);
    let dataset = tokio::task::spawn_blocking(move || loader.load())
        .await
        .context("Dataset loading task failed")?
        .with_context(|| format!("Failed to load dataset from {}", data_dir.display()))?;

    info!(
        orders = dataset.orders.len(),
        items = dataset.order_items.len(),
        customers = dataset.customers.len(),
        "Dataset loaded"
    );

    Ok(build_app_state(dataset, settings))
}

/// Wrap an already loaded dataset into application state
pub fn build_app_state(dataset: model::Dataset, settings: Settings) -> AppState {
    let cache = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    AppState {
        dataset: Arc::new(dataset),
        cache,
        settings: Arc::new(settings),
    }
}
