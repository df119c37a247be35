//! Shop API clients.
//!
//! # Architecture
//!
//! - [`ApiClient`] is the single choke point for remote calls: it attaches
//!   the access credential to every request and runs the renewal protocol
//!   on 401
//! - [`CatalogClient`] layers `moka` caching over catalog reads (5 minute
//!   TTL)
//! - [`OrdersClient`] covers order history and checkout submission, never
//!   cached
//!
//! # Renewal protocol
//!
//! A 401 on a request that has not yet been retried triggers a refresh-token
//! exchange (`POST /token/refresh/`, unauthenticated). The exchange is
//! guarded by an async mutex: concurrent 401s coalesce into one in-flight
//! renewal, and a caller that acquires the latch after the token already
//! changed retries without issuing a second exchange. On success only the
//! access credential is overwritten and the original request is replayed
//! exactly once. On failure the credential store is cleared, the registered
//! session-expired hook fires once, and every waiting caller fails with
//! [`ApiError::SessionExpired`].

mod auth;
mod catalog;
mod orders;

pub use catalog::CatalogClient;
pub use orders::OrdersClient;

use std::sync::{Arc, RwLock};

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::StoreConfig;
use crate::error::{ApiError, Result};
use crate::session::credentials::CredentialStore;
use crate::storage::Storage;

/// Callback invoked when the session can no longer be renewed.
///
/// The browser analog is forced navigation to the login page. Fires at most
/// once per failed renewal, regardless of how many requests were waiting.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Client for the shop REST API.
///
/// Cheap to clone; all clones share the HTTP connection pool, credential
/// store, and renewal latch.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    credentials: CredentialStore,
    /// Serializes renewal attempts; see module docs.
    renewal: tokio::sync::Mutex<()>,
    on_session_expired: RwLock<Option<SessionExpiredHook>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &StoreConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.clone(),
                credentials: CredentialStore::new(storage),
                renewal: tokio::sync::Mutex::new(()),
                on_session_expired: RwLock::new(None),
            }),
        })
    }

    /// Register the hook that runs when the session cannot be renewed.
    ///
    /// The front end uses this to route the user back to the login entry
    /// point. Replaces any previously registered hook.
    pub fn set_session_expired_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        let mut slot = self
            .inner
            .on_session_expired
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(Arc::new(hook));
    }

    pub(crate) fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    fn notify_session_expired(&self) {
        let hook = self
            .inner
            .on_session_expired
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        match hook {
            Some(hook) => hook(),
            None => tracing::warn!("session expired and no hook registered"),
        }
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Issue an authenticated GET and deserialize the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, None::<&()>).await
    }

    /// Issue an authenticated POST and deserialize the JSON body.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// Issue an authenticated PATCH and deserialize the JSON body.
    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request_json(Method::PATCH, path, Some(body)).await
    }

    /// Core request path: attach the access credential, send, and on a 401
    /// that has not yet been retried run the renewal protocol and replay
    /// once.
    ///
    /// The retry budget is an explicit local counter, never state carried on
    /// a shared request object.
    async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.inner.base_url.join(path)?;
        let mut attempt: u8 = 0;

        loop {
            let access = self.inner.credentials.load()?.map(|pair| pair.access);

            let mut request = self.inner.http.request(method.clone(), url.clone());
            if let Some(token) = &access {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                if attempt == 0 && access.is_some() {
                    tracing::debug!(%url, "401 received, attempting credential renewal");
                    self.renew_access(access).await?;
                    attempt += 1;
                    continue;
                }
                // Anonymous 401, or a replay that was rejected again.
                return Err(ApiError::SessionExpired);
            }

            return Self::classify_response(response).await;
        }
    }

    /// Issue an unauthenticated request, bypassing both the bearer header
    /// and the renewal machinery. Used for login and the renewal exchange
    /// itself.
    pub(crate) async fn post_json_unauthenticated<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.inner.base_url.join(path)?;
        let response = self.inner.http.post(url).json(body).send().await?;
        Self::classify_response(response).await
    }

    /// Map a response onto the error taxonomy, deserializing on success.
    async fn classify_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            return serde_json::from_str(&text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to parse API response"
                );
                ApiError::Parse(e)
            });
        }

        let text = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "shop API returned server error"
            );
            return Err(ApiError::Server(status.as_u16()));
        }

        Err(ApiError::Validation {
            status: status.as_u16(),
            message: extract_error_message(&text),
        })
    }

    // =========================================================================
    // Renewal protocol
    // =========================================================================

    /// Exchange the stored refresh credential for a new access credential,
    /// coalescing concurrent triggers into one in-flight renewal.
    ///
    /// `stale_access` is the access token the caller's failed request
    /// carried; if the stored token already differs by the time the latch is
    /// acquired, another caller completed the renewal and we return without
    /// a second exchange.
    async fn renew_access(&self, stale_access: Option<String>) -> Result<()> {
        let _guard = self.inner.renewal.lock().await;

        let Some(pair) = self.inner.credentials.load()? else {
            // A renewal that failed while we waited cleared the store; the
            // hook already fired there.
            return Err(ApiError::SessionExpired);
        };

        if stale_access.as_deref() != Some(pair.access.as_str()) {
            tracing::debug!("access credential already renewed by a concurrent request");
            return Ok(());
        }

        match self.exchange_refresh_token(&pair.refresh).await {
            Ok(access) => {
                self.inner.credentials.store_access(&access)?;
                tracing::debug!("access credential renewed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential renewal failed, clearing session");
                self.inner.credentials.clear()?;
                self.notify_session_expired();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// The renewal exchange itself: `POST /token/refresh/` carrying only the
    /// refresh credential, never a bearer header.
    async fn exchange_refresh_token(&self, refresh: &str) -> Result<String> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh: &'a str,
        }

        #[derive(serde::Deserialize)]
        struct RefreshResponse {
            access: String,
        }

        let response: RefreshResponse = self
            .post_json_unauthenticated("token/refresh/", &RefreshRequest { refresh })
            .await?;
        Ok(response.access)
    }
}

/// Pull a human-readable message out of a 4xx body.
///
/// The API reports failures as `{"detail": ...}` or `{"error": ...}`; fall
/// back to the raw body when neither is present.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

/// A list endpoint body: either a plain JSON array or a paginated envelope
/// with a `results` field, depending on server configuration.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paginated { results } => results,
            Self::Plain(items) => items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_detail() {
        assert_eq!(
            extract_error_message(r#"{"detail": "Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_error_message_error_key() {
        assert_eq!(
            extract_error_message(r#"{"error": "Insufficient stock for Widget"}"#),
            "Insufficient stock for Widget"
        );
    }

    #[test]
    fn test_extract_error_message_fallback() {
        assert_eq!(extract_error_message("not json"), "not json");
        assert_eq!(extract_error_message("   "), "Request failed");
    }

    #[test]
    fn test_list_response_both_shapes() {
        let plain: ListResponse<i32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2, 3]);

        let paginated: ListResponse<i32> =
            serde_json::from_str(r#"{"count": 3, "results": [1, 2, 3]}"#).unwrap();
        assert_eq!(paginated.into_vec(), vec![1, 2, 3]);
    }
}
