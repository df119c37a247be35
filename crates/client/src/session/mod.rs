//! Session lifecycle: login, logout, current user, checkout gating.
//!
//! [`Session`] is the one owner of process-wide session state (the cached
//! user). It is cheap to clone; all clones share state, and reads go
//! through narrow accessors rather than ambient globals.
//!
//! "Authenticated" means a user is currently cached, not that a credential
//! exists: a stale credential pair that fails its first authenticated call
//! clears both.

pub mod credentials;

pub use credentials::{CredentialPair, CredentialStore};

use std::sync::{Arc, RwLock};

use tracing::instrument;

use crate::api::{ApiClient, OrdersClient};
use crate::cart::CartStore;
use crate::error::ApiError;
use crate::models::{CreateOrder, CreateOrderItem, Order, User};

/// The result of a login attempt.
///
/// Login never returns `Err`; failures carry a user-facing message instead,
/// so UI code never needs to inspect transport detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Logged in; the profile is now cached.
    Success(User),
    /// Not logged in; the message is safe to display.
    Failed(String),
}

impl LoginOutcome {
    /// Whether the login succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Errors refusing or failing a checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// No user is cached; the caller should route to login instead of
    /// submitting an unauthenticated order.
    #[error("login required to check out")]
    NotAuthenticated,

    /// The cart is empty; checkout is blocked until something is added.
    #[error("cart is empty")]
    EmptyCart,

    /// The order submission itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Default)]
struct SessionState {
    user: Option<User>,
    /// Bumped on logout so a login or restore that was already in flight
    /// discards its response instead of resurrecting a torn-down session.
    epoch: u64,
}

/// Session façade over the API client and credential store.
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    orders: OrdersClient,
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// Create a session over the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let orders = OrdersClient::new(api.clone());
        Self {
            api,
            orders,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Authenticate and cache the user's profile.
    ///
    /// On success the credential pair is persisted before the profile
    /// fetch, so the fetch itself rides the normal authenticated path. A
    /// failed profile fetch rolls the credentials back - a session is only
    /// "authenticated" once a user is cached.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let epoch = self.read_state(|s| s.epoch);

        let pair = match self.api.obtain_tokens(username, password).await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::debug!(error = %e, "login rejected");
                return LoginOutcome::Failed(e.display_message());
            }
        };
        if let Err(e) = self.api.credentials().save(&pair) {
            return LoginOutcome::Failed(ApiError::from(e).display_message());
        }

        match self.api.current_user().await {
            Ok(user) => {
                let cached = self.with_state(|s| {
                    if s.epoch == epoch {
                        s.user = Some(user.clone());
                        true
                    } else {
                        false
                    }
                });
                if cached {
                    tracing::info!(user_id = %user.id, "logged in");
                    LoginOutcome::Success(user)
                } else {
                    // A logout raced this login; drop the pair the exchange
                    // persisted after the logout's clear, so the closed
                    // session stays closed.
                    if let Err(e) = self.api.credentials().clear() {
                        tracing::warn!(error = %e, "failed to clear credentials");
                    }
                    LoginOutcome::Failed("Session was closed, please log in again".to_string())
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "profile fetch after login failed");
                if let Err(e) = self.api.credentials().clear() {
                    tracing::warn!(error = %e, "failed to clear credentials");
                }
                LoginOutcome::Failed(e.display_message())
            }
        }
    }

    /// Drop the cached user and stored credentials; idempotent.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.with_state(|s| {
            s.user = None;
            s.epoch += 1;
        });
        if let Err(e) = self.api.credentials().clear() {
            tracing::warn!(error = %e, "failed to clear credentials");
        }
        tracing::info!("logged out");
    }

    /// Re-establish a session from persisted credentials, if any.
    ///
    /// Called once at startup. A credential pair that no longer works is
    /// cleaned up; the outcome is simply an anonymous session.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<User> {
        let epoch = self.read_state(|s| s.epoch);

        let has_credentials = match self.api.credentials().load() {
            Ok(pair) => pair.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read credentials");
                false
            }
        };
        if !has_credentials {
            return None;
        }

        match self.api.current_user().await {
            Ok(user) => {
                let cached = self.with_state(|s| {
                    if s.epoch == epoch {
                        s.user = Some(user.clone());
                        true
                    } else {
                        false
                    }
                });
                cached.then_some(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "stored credentials no longer valid");
                if let Err(e) = self.api.credentials().clear() {
                    tracing::warn!(error = %e, "failed to clear credentials");
                }
                None
            }
        }
    }

    /// The cached user, if logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read_state(|s| s.user.clone())
    }

    /// Whether a user is currently cached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state(|s| s.user.is_some())
    }

    /// The API client this session rides on.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Submit the cart as an order.
    ///
    /// Refused outright for anonymous sessions and empty carts; the caller
    /// routes those refusals to login or continue-shopping respectively.
    /// On success the cart is cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated`, `EmptyCart`, or the API failure from the
    /// submission itself (stock validation messages come back verbatim).
    #[instrument(skip(self, cart, shipping_address, phone_number))]
    pub async fn place_order(
        &self,
        cart: &mut CartStore,
        shipping_address: &str,
        phone_number: &str,
    ) -> Result<Order, CheckoutError> {
        if !self.is_authenticated() {
            return Err(CheckoutError::NotAuthenticated);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let payload = CreateOrder {
            shipping_address: shipping_address.to_string(),
            phone_number: phone_number.to_string(),
            items: cart
                .cart()
                .lines()
                .iter()
                .map(|line| CreateOrderItem {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
        };

        let order = self.orders.create(&payload).await?;
        cart.clear();
        tracing::info!(order_id = %order.id, "order placed");
        Ok(order)
    }

    fn read_state<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut state)
    }
}
