//! Static authenticator configuration.
//!
//! [`XingConfig`] is built once, validated, and then shared read-only (behind an [`Arc`]) by
//! every authentication attempt. [`XingConfigBuilder`] doubles as the deserializable
//! configuration surface, accepting the option names `consumerKey`, `consumerSecret`,
//! `callbackURL`, `profileFields`, `sessionKey`, `requestTokenURL`, `accessTokenURL`,
//! `userAuthorizationURL`, and `profileURL`.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	provider::{
		self, DEFAULT_SESSION_KEY, EndpointOverrides, ProviderEndpoints, ProviderFieldList,
	},
};

/// Builder (and deserializable form) for [`XingConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XingConfigBuilder {
	/// Consumer key identifying the application to Xing.
	#[serde(rename = "consumerKey", alias = "consumer_key")]
	pub consumer_key: String,
	/// Consumer secret proving ownership of the consumer key.
	#[serde(rename = "consumerSecret", alias = "consumer_secret")]
	pub consumer_secret: TokenSecret,
	/// Post-authorization redirect target.
	#[serde(rename = "callbackURL", alias = "callback_url")]
	pub callback_url: Option<String>,
	/// Canonical (or raw provider) profile fields to request.
	#[serde(rename = "profileFields", alias = "profile_fields")]
	pub profile_fields: Option<Vec<String>>,
	/// Storage namespace for in-flight request tokens.
	#[serde(rename = "sessionKey", alias = "session_key")]
	pub session_key: Option<String>,
	/// Endpoint overrides.
	#[serde(flatten)]
	pub endpoints: EndpointOverrides,
}
impl XingConfigBuilder {
	/// Creates a builder seeded with the consumer credentials.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: TokenSecret::new(consumer_secret),
			..Default::default()
		}
	}

	/// Sets the callback URL.
	pub fn callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());

		self
	}

	/// Sets the requested profile fields.
	pub fn profile_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.profile_fields = Some(fields.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the request-token storage namespace.
	pub fn session_key(mut self, key: impl Into<String>) -> Self {
		self.session_key = Some(key.into());

		self
	}

	/// Overrides the request-token endpoint.
	pub fn request_token_url(mut self, url: impl Into<String>) -> Self {
		self.endpoints.request_token = Some(url.into());

		self
	}

	/// Overrides the access-token endpoint.
	pub fn access_token_url(mut self, url: impl Into<String>) -> Self {
		self.endpoints.access_token = Some(url.into());

		self
	}

	/// Overrides the user-authorization endpoint.
	pub fn user_authorization_url(mut self, url: impl Into<String>) -> Self {
		self.endpoints.user_authorization = Some(url.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: impl Into<String>) -> Self {
		self.endpoints.profile = Some(url.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<XingConfig, ConfigError> {
		if self.consumer_key.is_empty() {
			return Err(ConfigError::MissingConsumerKey);
		}
		if self.consumer_secret.is_empty() {
			return Err(ConfigError::MissingConsumerSecret);
		}

		let session_key = self.session_key.unwrap_or_else(|| DEFAULT_SESSION_KEY.to_owned());

		if session_key.is_empty() {
			return Err(ConfigError::EmptySessionKey);
		}

		let callback_url = self
			.callback_url
			.as_deref()
			.map(Url::parse)
			.transpose()
			.map_err(|source| ConfigError::InvalidCallback { source })?;
		let endpoints = ProviderEndpoints::resolve(&self.endpoints)?;

		Ok(XingConfig {
			consumer_key: self.consumer_key,
			consumer_secret: self.consumer_secret,
			callback_url,
			profile_fields: self.profile_fields,
			session_key,
			endpoints,
		})
	}
}

/// Validated, immutable configuration shared across authentication attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XingConfig {
	/// Consumer key identifying the application to Xing.
	pub consumer_key: String,
	/// Consumer secret (redacted in `Debug`).
	pub consumer_secret: TokenSecret,
	/// Post-authorization redirect target; `oob` is sent when unset.
	pub callback_url: Option<Url>,
	/// Requested profile fields; `None` requests the documented default set.
	pub profile_fields: Option<Vec<String>>,
	/// Storage namespace for in-flight request tokens.
	pub session_key: String,
	/// Validated endpoint set.
	pub endpoints: ProviderEndpoints,
}
impl XingConfig {
	/// Creates a new builder seeded with the consumer credentials.
	pub fn builder(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> XingConfigBuilder {
		XingConfigBuilder::new(consumer_key, consumer_secret)
	}

	/// Provider fields requested by the profile fetch.
	pub fn profile_field_list(&self) -> ProviderFieldList {
		match self.profile_fields.as_deref() {
			Some(fields) => provider::translate(fields),
			None => provider::default_field_list(),
		}
	}

	/// Full profile URL including the `fields` query parameter.
	pub fn profile_request_url(&self) -> Url {
		let mut url = self.endpoints.profile.clone();

		url.query_pairs_mut().append_pair("fields", &self.profile_field_list().query_value());

		url
	}
}
