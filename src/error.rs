//! Authenticator-level error types shared across flows, profile normalization, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for transport and callback failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every variant is terminal for the authentication attempt that produced it; nothing in this
/// crate retries.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request-token store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider response body is not valid JSON.
	#[error("Provider response is not valid JSON.")]
	Parse {
		/// Underlying JSON syntax failure.
		#[source]
		source: serde_json::Error,
	},
	/// Provider response is valid JSON but lacks the expected shape.
	#[error(transparent)]
	MalformedPayload(#[from] PayloadError),
	/// Network or transport failure while talking to the provider.
	#[error("Failed to communicate with the provider during the {stage} stage.")]
	ProviderCommunication {
		/// Protocol step that failed.
		stage: ExchangeStage,
		/// Transport failure reported by the OAuth 1.0a client.
		#[source]
		source: TransportError,
	},

	/// User declined consent at the provider.
	#[error("User denied authorization: {problem}.")]
	AuthorizationDenied {
		/// Provider-supplied `oauth_problem` value.
		problem: String,
	},
	/// Request carries no host session handle to bind the attempt to.
	#[error("Authentication requests must carry a session handle.")]
	MissingSession,
	/// Callback carries a request token that was never issued to this session, was already
	/// consumed, or expired.
	#[error("Unable to verify the authorization callback against a pending request token.")]
	UnknownRequestToken,
	/// Caller-supplied verification callback failed.
	#[error("Verification callback failed.")]
	Verify {
		/// Error returned by the callback.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a transport failure for the provided protocol stage.
	pub fn communication(stage: ExchangeStage, source: TransportError) -> Self {
		Self::ProviderCommunication { stage, source }
	}
}

/// OAuth 1.0a protocol steps that reach the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeStage {
	/// Temporary credential (request token) acquisition.
	RequestToken,
	/// Request token to access token exchange.
	AccessToken,
	/// Authenticated profile fetch.
	Profile,
}
impl ExchangeStage {
	/// Returns a stable label suitable for messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::RequestToken => "request_token",
			ExchangeStage::AccessToken => "access_token",
			ExchangeStage::Profile => "profile",
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and validation failures raised while building the authenticator.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Consumer key is empty.
	#[error("Consumer key must not be empty.")]
	MissingConsumerKey,
	/// Consumer secret is empty.
	#[error("Consumer secret must not be empty.")]
	MissingConsumerSecret,
	/// Session key is empty.
	#[error("Session key must not be empty.")]
	EmptySessionKey,
	/// Endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Structural problems found in an otherwise well-formed provider payload.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Top-level `users` collection is absent or not an array.
	#[error("Provider payload is missing the users collection.")]
	MissingUsers,
	/// Top-level `users` collection is empty.
	#[error("Provider payload contains an empty users collection.")]
	EmptyUsers,
	/// First user record does not match the expected schema.
	#[error("Provider user record is invalid.")]
	InvalidRecord {
		/// Structured decoding failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Birth date components do not form a calendar date.
	#[error("Provider birth date is not a valid calendar date.")]
	InvalidBirthDate {
		/// Component that fell outside its range.
		#[source]
		source: time::error::ComponentRange,
	},
}

/// Transport-level failures reported by OAuth 1.0a clients.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success HTTP status.
	#[error("Provider responded with HTTP status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Truncated response body, for diagnostics.
		body_preview: String,
	},
	/// Token endpoint response lacks a required parameter.
	#[error("Token endpoint response is missing `{parameter}`.")]
	MissingTokenParameter {
		/// Missing form parameter name.
		parameter: &'static str,
	},
	/// Request signature could not be computed.
	#[error("Request signature could not be computed.")]
	Signing,
}
impl TransportError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Builds a [`TransportError::Status`] with a bounded body preview.
	pub fn status(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let mut body_preview: String = text.chars().take(Self::BODY_PREVIEW_LIMIT).collect();

		if text.chars().count() > Self::BODY_PREVIEW_LIMIT {
			body_preview.push('…');
		}

		Self::Status { status, body_preview }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn communication_error_exposes_transport_source() {
		let err = Error::communication(
			ExchangeStage::Profile,
			TransportError::network(std::io::Error::other("connection reset")),
		);

		assert!(err.to_string().contains("profile"));

		let source = StdError::source(&err).expect("Communication errors should expose a source.");

		assert!(source.to_string().contains("Network error"));
	}

	#[test]
	fn status_preview_is_truncated() {
		let body = "x".repeat(300);
		let TransportError::Status { status, body_preview } =
			TransportError::status(503, body.as_bytes())
		else {
			panic!("Status constructor should build the status variant.");
		};

		assert_eq!(status, 503);
		assert_eq!(body_preview.chars().count(), 257);
		assert!(body_preview.ends_with('…'));
	}
}
