//! OAuth 1.0a client collaborator contract and the bundled reqwest implementation.
//!
//! The authenticator never signs or sends anything itself. It talks to an [`OAuth1Client`],
//! a deliberately narrow capability set (temporary credentials, token exchange, and signed GETs)
//! so hosts can swap in their own transport, and tests can observe every outbound call.

#[cfg(feature = "reqwest")] mod client;
pub mod signature;

#[cfg(feature = "reqwest")] pub use client::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RequestToken},
	error::TransportError,
};

/// Future returned by [`OAuth1Client`] operations.
pub type OAuth1Future<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Capability interface for the OAuth 1.0a protocol steps the authenticator delegates.
///
/// Implementations own signing, nonce generation, and HTTP transport. They must not retry; a
/// failure is reported once and ends the authentication attempt.
pub trait OAuth1Client
where
	Self: Send + Sync,
{
	/// Obtains temporary credentials, announcing `callback` (or `oob` when absent).
	fn begin_authorization<'a>(&'a self, callback: Option<&'a Url>)
	-> OAuth1Future<'a, RequestToken>;

	/// Exchanges authorized temporary credentials for token credentials.
	fn exchange_token<'a>(
		&'a self,
		request_token: &'a RequestToken,
		verifier: Option<&'a str>,
	) -> OAuth1Future<'a, AccessToken>;

	/// Issues a signed GET and returns the response body of a successful response.
	fn authenticated_get<'a>(
		&'a self,
		url: &'a Url,
		token: &'a AccessToken,
	) -> OAuth1Future<'a, Vec<u8>>;
}
