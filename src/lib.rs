//! Hotel Desk
//!
//! Front-desk administration console for a small hotel. Room, booking,
//! customer, service and invoice data lives on a REST backend; this crate
//! holds the client side: typed repositories over the API, the auth and
//! display-settings contexts, route guards, and the screen state behind each
//! front-desk action.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod format;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod screens;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use navigation::Navigator;
use repository::{ApiClient, Repository};
use services::Services;
use storage::LocalStorage;

/// Application state shared by every screen
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: LocalStorage,
    pub navigator: Navigator,
    pub repository: Repository,
    pub services: Arc<Services>,
}

impl AppState {
    /// Wire storage, navigator, API client and contexts together.
    ///
    /// Inside a tokio runtime this also starts the display-settings watcher,
    /// so writes to the settings key from any handle are picked up.
    pub fn new(config: AppConfig, storage: LocalStorage) -> AppResult<Self> {
        let navigator = Navigator::default();
        let client = ApiClient::new(&config.api, storage.clone(), navigator.clone())?;
        let repository = Repository::new(client);
        let services = Services::new(&repository, storage.clone(), navigator.clone());

        if tokio::runtime::Handle::try_current().is_ok() {
            services.settings.watch();
        } else {
            tracing::debug!("No async runtime, display settings are not watched");
        }

        Ok(Self {
            config: Arc::new(config),
            storage,
            navigator,
            repository,
            services: Arc::new(services),
        })
    }

    /// Same as [`AppState::new`] with file-backed storage in the configured directory
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let storage = LocalStorage::open(&config.storage.dir)?;
        Self::new(config, storage)
    }
}
