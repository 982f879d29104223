//! Authentication context: who is signed in, and how they sign in and out

use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{Credentials, User},
    navigation::{Navigator, Route},
    repository::AuthRepository,
    storage::{LocalStorage, StorageEvent, TOKEN_KEY, USER_KEY},
};

/// Snapshot of the authentication context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until `init` has finished
    pub loading: bool,
    /// Last login failure, shown on the login screen
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Case-insensitive role check against an allow-list
    pub fn has_role(&self, allowed: &[&str]) -> bool {
        self.user
            .as_ref()
            .map(|u| u.has_any_role(allowed))
            .unwrap_or(false)
    }
}

/// Authentication context.
///
/// The context follows credential changes made through storage by anyone
/// else, most notably the API client clearing them on a 401. Pending storage
/// events are applied every time the state is read, so a forced logout is
/// visible to the very next guard check.
#[derive(Clone)]
pub struct AuthService {
    repository: AuthRepository,
    storage: LocalStorage,
    navigator: Navigator,
    state: Arc<RwLock<AuthState>>,
    events: Arc<Mutex<Receiver<StorageEvent>>>,
}

impl AuthService {
    pub fn new(repository: AuthRepository, storage: LocalStorage, navigator: Navigator) -> Self {
        let events = storage.subscribe();
        Self {
            repository,
            storage,
            navigator,
            state: Arc::new(RwLock::new(AuthState {
                loading: true,
                ..Default::default()
            })),
            events: Arc::new(Mutex::new(events)),
        }
    }

    pub fn state(&self) -> AuthState {
        self.apply_storage_events();
        self.snapshot()
    }

    fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply storage events received since the last read
    fn apply_storage_events(&self) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            match events.try_recv() {
                Ok(event) => self.sync_from_storage(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Auth context skipped {} storage events, re-reading", skipped);
                    self.resync_from_storage();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Drop events that predate a full re-read of storage
    fn discard_storage_events(&self) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        while !matches!(
            events.try_recv(),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed)
        ) {}
    }

    fn resync_from_storage(&self) {
        let user: Option<User> = match self.storage.token() {
            Ok(Some(_)) => self.storage.user().ok().flatten(),
            _ => None,
        };
        self.update(|s| s.user = user);
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn has_role(&self, allowed: &[&str]) -> bool {
        self.state().has_role(allowed)
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        f(&mut state);
    }

    /// Rehydrate the session from storage, then validate the token with the backend.
    ///
    /// A 401 drops the session. Any other failure (network down, 500) keeps the
    /// locally cached user, so a flaky backend does not log staff out.
    pub async fn init(&self) -> AuthState {
        self.discard_storage_events();
        self.update(|s| s.loading = true);

        let token = self.storage.token().unwrap_or_else(|e| {
            tracing::warn!("Could not read stored token: {}", e);
            None
        });

        if token.is_none() {
            self.update(|s| {
                s.user = None;
                s.loading = false;
            });
            return self.state();
        }

        let cached: Option<User> = self.storage.user().unwrap_or_else(|e| {
            tracing::warn!("Could not read stored user: {}", e);
            None
        });
        self.update(|s| s.user = cached);

        match self.repository.profile().await {
            Ok(user) => {
                tracing::info!("Session restored for '{}'", user.username);
                if let Err(e) = self.storage.set_user(&user) {
                    tracing::warn!("Could not store refreshed user: {}", e);
                }
                self.update(|s| s.user = Some(user));
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored session is no longer valid");
                if let Err(e) = self.storage.clear_credentials() {
                    tracing::error!("Failed to clear stored credentials: {}", e);
                }
                self.update(|s| s.user = None);
            }
            Err(e) => {
                tracing::warn!("Token validation failed, keeping cached session: {}", e);
            }
        }

        self.update(|s| s.loading = false);
        self.state()
    }

    /// Sign in, store the token and user record, then go to the dashboard
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        if let Err(errors) = credentials.validate() {
            let err = AppError::from(errors);
            self.update(|s| s.error = Some(err.user_message()));
            return Err(err);
        }

        self.update(|s| s.error = None);

        let response = match self.repository.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login failed for '{}': {}", credentials.username, e);
                let message = match &e {
                    AppError::Authentication(_) => {
                        "Tên đăng nhập hoặc mật khẩu không đúng".to_string()
                    }
                    other => other.user_message(),
                };
                self.update(|s| s.error = Some(message));
                return Err(e);
            }
        };

        self.storage.set_token(&response.token)?;
        self.storage.set_user(&response.user)?;

        tracing::info!(
            "User '{}' signed in with role '{}'",
            response.user.username,
            response.user.role()
        );

        let user = response.user;
        self.update(|s| {
            s.user = Some(user.clone());
            s.loading = false;
        });
        self.navigator.navigate(Route::Dashboard);
        Ok(user)
    }

    /// Clear the session and go to the login screen
    pub fn logout(&self) -> AppResult<()> {
        if let Some(user) = self.current_user() {
            tracing::info!("User '{}' signed out", user.username);
        }
        self.storage.clear_credentials()?;
        self.update(|s| {
            s.user = None;
            s.error = None;
        });
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    /// Follow credential changes made elsewhere (401 handling, another process)
    pub fn sync_from_storage(&self, event: &StorageEvent) {
        match (event.key.as_str(), event.removed) {
            (TOKEN_KEY, true) | (USER_KEY, true) => {
                if self.snapshot().is_authenticated() {
                    tracing::info!("Credentials removed from storage, dropping session");
                }
                self.update(|s| s.user = None);
            }
            (USER_KEY, false) => {
                if !matches!(self.storage.token(), Ok(Some(_))) {
                    return;
                }
                match self.storage.user::<User>() {
                    Ok(Some(user)) => self.update(|s| s.user = Some(user)),
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Could not reload stored user: {}", e),
                }
            }
            _ => {}
        }
    }
}
