//! HTTP client wrapper for the hotel REST backend
//!
//! Every call reads the bearer token from local storage at send time. A 401
//! from any endpoint clears the stored credentials and sends the navigator to
//! the login screen. Nothing is retried, deduplicated or cached.

use std::time::{Duration, Instant};

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    navigation::Navigator,
    storage::LocalStorage,
};

/// `{ "data": ... }` with nothing beside it
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DataOnly<T> {
    data: T,
}

/// `{ "data": ..., "meta": ... }`, siblings ignored
#[derive(Deserialize)]
struct DataWithSiblings<T> {
    data: T,
}

/// Bodies may come bare or wrapped in `{ "data": ... }`. When `data` sits
/// next to other fields the bare shape is tried first, so a target that
/// reads those fields itself (report totals, checkout message) keeps them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped(DataOnly<T>),
    Bare(T),
    Loose(DataWithSiblings<T>),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped(wrapped) => wrapped.data,
            Envelope::Bare(value) => value,
            Envelope::Loose(wrapped) => wrapped.data,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    storage: LocalStorage,
    navigator: Navigator,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, storage: LocalStorage, navigator: Navigator) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage,
            navigator,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = self.storage.token()? {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.request(Method::GET, path)?;
        self.send(Method::GET, path, request).await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> AppResult<T> {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(Method::GET, path, request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, path, request).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.request(Method::POST, path)?;
        self.send(Method::POST, path, request).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(Method::PUT, path, request).await
    }

    /// DELETE, ignoring whatever body the backend sends back
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(Method::DELETE, path, request).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let body = self.execute(method, path, request).await?;
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        let envelope: Envelope<T> = serde_json::from_str(text).map_err(|e| {
            tracing::error!("Unexpected response body from {}: {}", path, e);
            AppError::Serialization(e)
        })?;
        Ok(envelope.into_inner())
    }

    /// Send the request and return the body of a successful response
    async fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> AppResult<String> {
        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, path, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(
            "{} {} -> {} in {}ms",
            method,
            path,
            status.as_u16(),
            started.elapsed().as_millis()
        );

        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        let message = server_message(&body);
        tracing::error!(
            "{} {} returned {}: {}",
            method,
            path,
            status.as_u16(),
            message.as_deref().unwrap_or("<no message>")
        );
        Err(AppError::from_status(status, message))
    }

    /// Forced logout: drop credentials, leave for the login screen
    fn handle_unauthorized(&self) {
        tracing::warn!("Session rejected by the server, clearing stored credentials");
        if let Err(e) = self.storage.clear_credentials() {
            tracing::error!("Failed to clear stored credentials: {}", e);
        }
        self.navigator.redirect_to_login();
    }
}

/// Human-readable message from an error body, if the backend sent one
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        })
}
