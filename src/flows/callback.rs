//! Inbound request model and the first state-machine transition.
//!
//! When a user refuses access, Xing links back to the callback URL with
//! `?oauth_problem=user_refused`. That query parameter is the only signal, so classification
//! looks at it before anything else and before any network call.

// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Query parameter Xing uses to report a refused or failed authorization.
pub const DENIAL_PARAM: &str = "oauth_problem";

/// Request that reached the authentication route: its query parameters plus the host's session
/// handle.
///
/// The session handle (typically the session cookie's identifier) binds the callback to the
/// user agent that started the attempt. Requests without one can only be classified as denials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboundRequest {
	session: Option<String>,
	query: Vec<(String, String)>,
}
impl InboundRequest {
	/// Captures the query parameters of a full request URL.
	pub fn from_url(url: &Url) -> Self {
		Self { session: None, query: url.query_pairs().into_owned().collect() }
	}

	/// Parses a raw (undecoded) query string without the leading `?`.
	pub fn from_query(query: &str) -> Self {
		let query = form_urlencoded::parse(query.as_bytes()).into_owned().collect();

		Self { session: None, query }
	}

	/// Attaches the host session handle of the user agent that sent the request.
	pub fn with_session(mut self, session: impl Into<String>) -> Self {
		self.session = Some(session.into());

		self
	}

	/// Host session handle, if a non-empty one was attached.
	pub fn session(&self) -> Option<&str> {
		self.session.as_deref().filter(|session| !session.is_empty())
	}

	/// Appends a decoded query parameter.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((name.into(), value.into()));

		self
	}

	/// Returns the first value of `name`, if present.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}

	/// Classifies the request into the protocol phase it belongs to.
	pub fn phase(&self) -> Phase<'_> {
		if let Some(problem) = self.non_empty(DENIAL_PARAM) {
			return Phase::Denied { problem };
		}

		match self.non_empty("oauth_token") {
			Some(oauth_token) =>
				Phase::Callback { oauth_token, verifier: self.non_empty("oauth_verifier") },
			None => Phase::Begin,
		}
	}

	fn non_empty(&self, name: &str) -> Option<&str> {
		self.param(name).filter(|value| !value.is_empty())
	}
}

/// Protocol phase of an inbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase<'a> {
	/// The provider reported that the user declined authorization.
	Denied {
		/// Provider-supplied problem code (e.g. `user_refused`).
		problem: &'a str,
	},
	/// The provider redirected back with an authorized request token.
	Callback {
		/// Public request-token identifier.
		oauth_token: &'a str,
		/// Verifier proving the user authorized the token.
		verifier: Option<&'a str>,
	},
	/// No protocol parameters; a new authorization must start.
	Begin,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn denial_wins_over_callback_parameters() {
		let request = InboundRequest::from_query(
			"oauth_token=req-1&oauth_verifier=1234&oauth_problem=user_refused",
		);

		assert_eq!(request.phase(), Phase::Denied { problem: "user_refused" });
	}

	#[test]
	fn callback_url_is_classified_as_callback() {
		let url = Url::parse(
			"https://www.example.net/auth/xing/callback?oauth_token=req-1&oauth_verifier=1234",
		)
		.expect("Fixture URL should parse.");

		assert_eq!(
			InboundRequest::from_url(&url).phase(),
			Phase::Callback { oauth_token: "req-1", verifier: Some("1234") }
		);
	}

	#[test]
	fn empty_protocol_parameters_are_ignored() {
		assert_eq!(InboundRequest::from_query("oauth_problem=").phase(), Phase::Begin);
		assert_eq!(InboundRequest::from_query("oauth_token=&next=%2Fhome").phase(), Phase::Begin);
		assert_eq!(InboundRequest::default().phase(), Phase::Begin);
	}

	#[test]
	fn params_are_decoded_and_first_value_wins() {
		let request = InboundRequest::from_query("next=%2Faccount&next=%2Fother")
			.with_param("oauth_verifier", "v 1");

		assert_eq!(request.param("next"), Some("/account"));
		assert_eq!(request.param("oauth_verifier"), Some("v 1"));
		assert_eq!(request.param("missing"), None);
	}

	#[test]
	fn empty_session_handle_counts_as_absent() {
		assert_eq!(InboundRequest::default().session(), None);
		assert_eq!(InboundRequest::default().with_session("").session(), None);
		assert_eq!(InboundRequest::default().with_session("sid-1").session(), Some("sid-1"));
	}
}
