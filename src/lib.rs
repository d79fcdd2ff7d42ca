//! Xing sign-in over OAuth 1.0a: delegated authorization, signed profile fetches, and canonical
//! profile normalization in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
#[cfg(feature = "reqwest")] pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod provider;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::XingConfig,
		flows::{DelegatedAuthenticator, Verify},
		http::ReqwestHttpClient,
		oauth::ReqwestOAuth1Client,
		store::{MemoryStore, RequestTokenStore},
	};

	/// Authenticator type alias used by reqwest-backed integration tests.
	pub type ReqwestTestAuthenticator<V> = DelegatedAuthenticator<ReqwestOAuth1Client, V>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`DelegatedAuthenticator`] backed by an in-memory request-token store and the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_authenticator<V>(
		config: XingConfig,
		verify: V,
	) -> (ReqwestTestAuthenticator<V>, Arc<MemoryStore>)
	where
		V: Verify,
	{
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn RequestTokenStore> = store_backend.clone();
		let client = ReqwestOAuth1Client::with_http_client(&config, test_reqwest_http_client());
		let authenticator = DelegatedAuthenticator::new(config, client, store, verify);

		(authenticator, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::{HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Date, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
