//! Display settings context backed by local storage

use std::sync::{Arc, RwLock};

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};

use crate::{
    error::{AppError, AppResult},
    models::DisplaySettings,
    storage::{LocalStorage, StorageEvent, SETTINGS_KEY},
};

#[derive(Clone)]
pub struct SettingsService {
    storage: LocalStorage,
    current: Arc<RwLock<DisplaySettings>>,
}

impl SettingsService {
    /// Create the context and load whatever is stored
    pub fn new(storage: LocalStorage) -> Self {
        let service = Self {
            storage,
            current: Arc::new(RwLock::new(DisplaySettings::default())),
        };
        service.load();
        service
    }

    pub fn current(&self) -> DisplaySettings {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn replace(&self, settings: DisplaySettings) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = settings;
    }

    /// Re-read the stored settings; missing or unreadable values fall back to defaults
    pub fn load(&self) -> DisplaySettings {
        let settings = match self.storage.get_json::<DisplaySettings>(SETTINGS_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => DisplaySettings::default(),
            Err(e) => {
                tracing::warn!("Could not read display settings, using defaults: {}", e);
                DisplaySettings::default()
            }
        };
        self.replace(settings.clone());
        settings
    }

    pub fn save(&self, settings: DisplaySettings) -> AppResult<()> {
        self.storage.set_json(SETTINGS_KEY, &settings)?;
        tracing::debug!("Display settings saved");
        self.replace(settings);
        Ok(())
    }

    /// Apply a change to a copy of the current settings and save it
    pub fn update<F>(&self, change: F) -> AppResult<DisplaySettings>
    where
        F: FnOnce(&mut DisplaySettings) -> Result<(), String>,
    {
        let mut settings = self.current();
        change(&mut settings).map_err(AppError::Validation)?;
        self.save(settings.clone())?;
        Ok(settings)
    }

    /// Set a single setting by its stored key
    pub fn set(&self, key: &str, value: &str) -> AppResult<DisplaySettings> {
        self.update(|s| s.set_field(key, value))
    }

    pub fn reset(&self) -> AppResult<DisplaySettings> {
        let defaults = DisplaySettings::default();
        self.save(defaults.clone())?;
        Ok(defaults)
    }

    /// Reload when the settings key changed; returns whether it did
    pub fn reload_on(&self, event: &StorageEvent) -> bool {
        if event.key != SETTINGS_KEY {
            return false;
        }
        self.load();
        true
    }

    /// Background task re-reading settings on storage-change events
    pub fn watch(&self) -> JoinHandle<()> {
        let service = self.clone();
        let mut events = self.storage.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        service.reload_on(&event);
                    }
                    Err(RecvError::Lagged(_)) => {
                        service.load();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
