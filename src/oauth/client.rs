// crates.io
use reqwest::Method;
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RequestToken, TokenSecret},
	config::XingConfig,
	error::{ConfigError, TransportError},
	http::ReqwestHttpClient,
	oauth::{OAuth1Client, OAuth1Future, signature::Signer},
};

const OUT_OF_BAND: &str = "oob";

/// [`OAuth1Client`] that signs with HMAC-SHA1 and sends requests through reqwest.
#[derive(Clone)]
pub struct ReqwestOAuth1Client {
	http_client: ReqwestHttpClient,
	consumer_key: String,
	consumer_secret: TokenSecret,
	request_token_url: Url,
	access_token_url: Url,
}
impl ReqwestOAuth1Client {
	/// Builds a client for the configured consumer with a redirect-free reqwest transport.
	pub fn new(config: &XingConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}

	/// Builds a client for the configured consumer that reuses `http_client`.
	pub fn with_http_client(config: &XingConfig, http_client: ReqwestHttpClient) -> Self {
		Self {
			http_client,
			consumer_key: config.consumer_key.clone(),
			consumer_secret: config.consumer_secret.clone(),
			request_token_url: config.endpoints.request_token.clone(),
			access_token_url: config.endpoints.access_token.clone(),
		}
	}

	fn signer(&self) -> Signer<'_> {
		Signer::new(&self.consumer_key, &self.consumer_secret)
	}

	async fn token_request(
		&self,
		url: &Url,
		token: Option<(&str, &TokenSecret)>,
		protocol_params: &[(&'static str, &str)],
	) -> Result<(String, String), TransportError> {
		let authorization = self.signer().authorization("POST", url, token, protocol_params)?;
		let body = self.http_client.send_signed(Method::POST, url, &authorization).await?;

		parse_token_response(&body)
	}
}
impl Debug for ReqwestOAuth1Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReqwestOAuth1Client")
			.field("consumer_key", &self.consumer_key)
			.field("request_token_url", &self.request_token_url.as_str())
			.field("access_token_url", &self.access_token_url.as_str())
			.finish()
	}
}
impl OAuth1Client for ReqwestOAuth1Client {
	fn begin_authorization<'a>(
		&'a self,
		callback: Option<&'a Url>,
	) -> OAuth1Future<'a, RequestToken> {
		Box::pin(async move {
			let callback = callback.map_or(OUT_OF_BAND, Url::as_str);
			let (token, secret) = self
				.token_request(&self.request_token_url, None, &[("oauth_callback", callback)])
				.await?;

			Ok(RequestToken::new(token, secret))
		})
	}

	fn exchange_token<'a>(
		&'a self,
		request_token: &'a RequestToken,
		verifier: Option<&'a str>,
	) -> OAuth1Future<'a, AccessToken> {
		Box::pin(async move {
			let token = Some((request_token.token.as_str(), &request_token.secret));
			let (token, secret) = match verifier {
				Some(verifier) =>
					self.token_request(
						&self.access_token_url,
						token,
						&[("oauth_verifier", verifier)],
					)
					.await?,
				None => self.token_request(&self.access_token_url, token, &[]).await?,
			};

			Ok(AccessToken::new(token, secret))
		})
	}

	fn authenticated_get<'a>(
		&'a self,
		url: &'a Url,
		token: &'a AccessToken,
	) -> OAuth1Future<'a, Vec<u8>> {
		Box::pin(async move {
			let credentials = Some((token.token.as_str(), &token.secret));
			let authorization = self.signer().authorization("GET", url, credentials, &[])?;

			self.http_client.send_signed(Method::GET, url, &authorization).await
		})
	}
}

fn parse_token_response(body: &[u8]) -> Result<(String, String), TransportError> {
	let mut token = None;
	let mut secret = None;

	for (key, value) in form_urlencoded::parse(body) {
		match key.as_ref() {
			"oauth_token" => token = Some(value.into_owned()),
			"oauth_token_secret" => secret = Some(value.into_owned()),
			_ => {},
		}
	}

	let token = token.ok_or(TransportError::MissingTokenParameter { parameter: "oauth_token" })?;
	let secret =
		secret.ok_or(TransportError::MissingTokenParameter { parameter: "oauth_token_secret" })?;

	Ok((token, secret))
}
