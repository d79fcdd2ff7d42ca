//! Temporary and token credentials (RFC 5849 §2).

pub mod secret;

// self
use crate::{_prelude::*, auth::TokenSecret};

macro_rules! def_credentials {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		pub struct $name {
			/// Public token identifier (`oauth_token`).
			pub token: String,
			/// Shared secret paired with the token (`oauth_token_secret`).
			pub secret: TokenSecret,
		}
		impl $name {
			/// Pairs a token identifier with its shared secret.
			pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
				Self { token: token.into(), secret: TokenSecret::new(secret) }
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_struct(stringify!($name))
					.field("token", &self.token)
					.field("secret", &self.secret)
					.finish()
			}
		}
	};
}

def_credentials!(
	RequestToken,
	"Temporary credentials issued before the user authorizes the consumer."
);
def_credentials!(AccessToken, "Token credentials issued once the user authorized the consumer.");

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credentials_debug_redacts_secret() {
		let token = AccessToken::new("token-1", "hunter2");
		let rendered = format!("{token:?}");

		assert!(rendered.contains("token-1"));
		assert!(!rendered.contains("hunter2"));
	}
}
