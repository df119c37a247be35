//! Authentication endpoints.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::models::User;
use crate::session::credentials::CredentialPair;

use super::ApiClient;

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access: String,
    refresh: String,
}

impl ApiClient {
    /// Exchange a username and password for a credential pair.
    ///
    /// Sent without a bearer header: a stale credential must not interfere
    /// with a fresh login.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for rejected credentials and `Transport` when
    /// the API is unreachable.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn obtain_tokens(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialPair> {
        let response: TokenResponse = self
            .post_json_unauthenticated("token/", &TokenRequest { username, password })
            .await?;
        Ok(CredentialPair {
            access: response.access,
            refresh: response.refresh,
        })
    }

    /// Fetch the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns `SessionExpired` when no valid session exists.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.get_json("users/me/").await
    }
}
