//! Endpoint metadata for Xing's OAuth 1.0a and users APIs.

// self
use crate::{_prelude::*, error::ConfigError};

/// Provider tag stamped on every normalized profile.
pub const PROVIDER_NAME: &str = "xing";
/// Default session key under which in-flight request tokens are kept.
pub const DEFAULT_SESSION_KEY: &str = "oauth:xing";
/// Documented temporary-credential endpoint.
pub const DEFAULT_REQUEST_TOKEN_URL: &str = "https://api.xing.com/v1/request_token";
/// Documented token-credential endpoint.
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://api.xing.com/v1/access_token";
/// Documented resource-owner authorization endpoint.
pub const DEFAULT_USER_AUTHORIZATION_URL: &str = "https://api.xing.com/v1/authorize";
/// Documented "current user" resource.
pub const DEFAULT_PROFILE_URL: &str = "https://api.xing.com/v1/users/me.json";

/// Optional endpoint overrides; unset entries fall back to the documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointOverrides {
	/// Override for the request-token endpoint.
	#[serde(rename = "requestTokenURL", alias = "request_token_url")]
	pub request_token: Option<String>,
	/// Override for the access-token endpoint.
	#[serde(rename = "accessTokenURL", alias = "access_token_url")]
	pub access_token: Option<String>,
	/// Override for the user-authorization endpoint.
	#[serde(rename = "userAuthorizationURL", alias = "user_authorization_url")]
	pub user_authorization: Option<String>,
	/// Override for the profile endpoint.
	#[serde(rename = "profileURL", alias = "profile_url")]
	pub profile: Option<String>,
}

/// Validated endpoint set used by the OAuth client and the profile fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
	/// Temporary-credential request endpoint.
	pub request_token: Url,
	/// Token-credential request endpoint.
	pub access_token: Url,
	/// Endpoint users are redirected to for authorization.
	pub user_authorization: Url,
	/// Authenticated "current user" resource.
	pub profile: Url,
}
impl ProviderEndpoints {
	/// Resolves overrides against the documented defaults and validates every endpoint.
	pub fn resolve(overrides: &EndpointOverrides) -> Result<Self, ConfigError> {
		Ok(Self {
			request_token: resolve_endpoint(
				"request_token",
				overrides.request_token.as_deref(),
				DEFAULT_REQUEST_TOKEN_URL,
			)?,
			access_token: resolve_endpoint(
				"access_token",
				overrides.access_token.as_deref(),
				DEFAULT_ACCESS_TOKEN_URL,
			)?,
			user_authorization: resolve_endpoint(
				"user_authorization",
				overrides.user_authorization.as_deref(),
				DEFAULT_USER_AUTHORIZATION_URL,
			)?,
			profile: resolve_endpoint("profile", overrides.profile.as_deref(), DEFAULT_PROFILE_URL)?,
		})
	}

	/// Builds the URL the user is redirected to after a request token was issued.
	pub fn authorization_redirect(&self, request_token: &str) -> Url {
		let mut url = self.user_authorization.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}
}

fn resolve_endpoint(
	name: &'static str,
	raw: Option<&str>,
	default: &str,
) -> Result<Url, ConfigError> {
	let url = Url::parse(raw.unwrap_or(default))
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })?;

	validate_endpoint(name, &url)?;

	Ok(url)
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() != "https" {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
