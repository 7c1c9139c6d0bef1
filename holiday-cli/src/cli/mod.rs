//! Command-line shell: routes, prompts and subcommand handlers

pub mod commands;
pub mod prompt;
pub mod shell;

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::api::{HolidayApiClient, HolidayRepository};
use crate::config::Config;
use crate::config::repository::{MemoryStateStore, SqliteStateStore, StateStore};

/// Everything a command handler needs, built once per invocation
pub struct AppContext {
    pub config: Config,
    pub api: Arc<HolidayApiClient>,
    pub store: Arc<dyn StateStore>,
}

impl AppContext {
    /// Build the API client and open the state store. With `persist` off,
    /// state lives only for this process.
    pub async fn new(config: Config, persist: bool) -> Result<Self> {
        let api = Arc::new(HolidayApiClient::new(
            &config.api.base_url,
            &config.resilience(),
        )?);
        debug!("Using API at {}", api.base_url());

        let store: Arc<dyn StateStore> = if persist {
            let path = config.state_db_path();
            debug!("Using state database {}", path.display());
            Arc::new(SqliteStateStore::open(&path).await?)
        } else {
            debug!("Persistence disabled; state kept in memory");
            Arc::new(MemoryStateStore::new())
        };

        Ok(Self { config, api, store })
    }

    pub fn repo(&self) -> Arc<dyn HolidayRepository> {
        self.api.clone()
    }
}
