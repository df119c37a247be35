//! Clementine storefront client library.
//!
//! A client for the Clementine shop REST API (JSON over HTTPS, bearer-token
//! authorization). The library owns the two stateful pieces a storefront
//! front end needs:
//!
//! - [`api::ApiClient`] - the single choke point for remote calls, with
//!   automatic single-flight renewal of the access credential on 401
//! - [`cart::CartStore`] - the client-side shopping cart, persisted to
//!   durable storage after every mutation
//!
//! Session lifecycle (login, logout, current user, checkout gating) lives in
//! [`session::Session`], which builds on both.
//!
//! # Example
//!
//! ```rust,ignore
//! use clementine_client::api::ApiClient;
//! use clementine_client::config::StoreConfig;
//! use clementine_client::session::Session;
//! use clementine_client::storage::FileStorage;
//! use std::sync::Arc;
//!
//! let config = StoreConfig::from_env()?;
//! let storage = Arc::new(FileStorage::new(&config.data_dir)?);
//! let api = ApiClient::new(&config, storage.clone())?;
//! let mut session = Session::new(api.clone());
//!
//! match session.login("alice", "hunter2").await {
//!     LoginOutcome::Success(user) => println!("hello {}", user.username),
//!     LoginOutcome::Failed(message) => eprintln!("{message}"),
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
