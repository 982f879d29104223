//! Cross-cutting contexts shared by every screen

pub mod auth;
pub mod settings;

use crate::{navigation::Navigator, repository::Repository, storage::LocalStorage};

pub use auth::{AuthService, AuthState};
pub use settings::SettingsService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub settings: SettingsService,
}

impl Services {
    pub fn new(repository: &Repository, storage: LocalStorage, navigator: Navigator) -> Self {
        Self {
            auth: AuthService::new(repository.auth.clone(), storage.clone(), navigator),
            settings: SettingsService::new(storage),
        }
    }
}
