//! Reqwest transport used by the bundled OAuth 1.0a client.

// std
use std::ops::Deref;
// crates.io
use reqwest::{Method, header::AUTHORIZATION, redirect::Policy};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// OAuth 1.0a token endpoints answer directly instead of redirecting, and a signature covers
/// exactly one URL, so clients built with [`ReqwestHttpClient::new`] never follow redirects.
/// Configure any custom [`ReqwestClient`] the same way.
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client that does not follow redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends a request carrying a precomputed OAuth `Authorization` header.
	///
	/// Non-2xx statuses become [`TransportError::Status`] so callers only ever see successful
	/// bodies.
	pub async fn send_signed(
		&self,
		method: Method,
		url: &Url,
		authorization: &str,
	) -> Result<Vec<u8>, TransportError> {
		let response = self
			.0
			.request(method, url.clone())
			.header(AUTHORIZATION, authorization)
			.send()
			.await?;
		let status = response.status();
		let body = response.bytes().await?.to_vec();

		if status.is_success() {
			Ok(body)
		} else {
			Err(TransportError::status(status.as_u16(), &body))
		}
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
