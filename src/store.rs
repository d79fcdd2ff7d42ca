//! Storage contracts for request tokens that are waiting on the user's authorization.
//!
//! Between the redirect to the provider and the callback, the request-token secret must be kept
//! server-side so the access-token exchange can be signed. Entries are keyed by the host's
//! session handle, the configured session key, and the public `oauth_token`; a callback arriving
//! from another session never finds the token. [`RequestTokenStore::take`] consumes entries so a
//! callback can never be replayed.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::RequestToken};

/// Future returned by [`RequestTokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for pending request tokens.
pub trait RequestTokenStore
where
	Self: Send + Sync,
{
	/// Persists a freshly issued request token under `key`.
	fn save<'a>(&'a self, key: &'a StoreKey, token: RequestToken) -> StoreFuture<'a, ()>;

	/// Removes and returns the pending token stored under `key`, if present and not expired.
	fn take<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<RequestToken>>;
}

/// Error type produced by [`RequestTokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Unique key identifying a pending request token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
	/// Host session that started the attempt.
	pub session: String,
	/// Session namespace (defaults to `oauth:xing`).
	pub session_key: String,
	/// Public request-token identifier.
	pub oauth_token: String,
}
impl StoreKey {
	/// Builds a key for the provided host session, namespace, and token.
	pub fn new(session: &str, session_key: &str, oauth_token: &str) -> Self {
		Self {
			session: session.to_owned(),
			session_key: session_key.to_owned(),
			oauth_token: oauth_token.to_owned(),
		}
	}
}
