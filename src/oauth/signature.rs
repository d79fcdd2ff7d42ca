//! HMAC-SHA1 request signing (RFC 5849 §3.4).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};

type HmacSha1 = Hmac<Sha1>;

const NONCE_LEN: usize = 32;
/// Everything except the RFC 3986 unreserved set is escaped.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Signs requests on behalf of one consumer.
#[derive(Clone, Copy, Debug)]
pub struct Signer<'a> {
	consumer_key: &'a str,
	consumer_secret: &'a TokenSecret,
}
impl<'a> Signer<'a> {
	/// Creates a signer for the provided consumer credentials.
	pub fn new(consumer_key: &'a str, consumer_secret: &'a TokenSecret) -> Self {
		Self { consumer_key, consumer_secret }
	}

	/// Builds the `Authorization` header value with a fresh nonce and the current time.
	pub fn authorization(
		&self,
		method: &str,
		url: &Url,
		token: Option<(&str, &TokenSecret)>,
		protocol_params: &[(&'static str, &str)],
	) -> Result<String, TransportError> {
		let nonce = random_nonce();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.authorization_with(method, url, token, protocol_params, &nonce, timestamp)
	}

	/// Builds the `Authorization` header value with a caller-supplied nonce and timestamp.
	pub fn authorization_with(
		&self,
		method: &str,
		url: &Url,
		token: Option<(&str, &TokenSecret)>,
		protocol_params: &[(&'static str, &str)],
		nonce: &str,
		timestamp: i64,
	) -> Result<String, TransportError> {
		let timestamp = timestamp.to_string();
		let mut oauth_params: Vec<(String, String)> = vec![
			("oauth_consumer_key".into(), self.consumer_key.into()),
			("oauth_nonce".into(), nonce.into()),
			("oauth_signature_method".into(), "HMAC-SHA1".into()),
			("oauth_timestamp".into(), timestamp),
			("oauth_version".into(), "1.0".into()),
		];

		if let Some((token, _)) = token {
			oauth_params.push(("oauth_token".into(), token.into()));
		}

		oauth_params
			.extend(protocol_params.iter().map(|(key, value)| ((*key).into(), (*value).into())));

		let base = signature_base_string(method, url, &oauth_params);
		let signature =
			sign(&base, self.consumer_secret.expose(), token.map(|(_, secret)| secret.expose()))?;

		oauth_params.push(("oauth_signature".into(), signature));
		oauth_params.sort();

		let rendered = oauth_params
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
			.collect::<Vec<_>>()
			.join(", ");

		Ok(format!("OAuth {rendered}"))
	}
}

/// Percent-encodes a value using the RFC 3986 unreserved set.
pub fn encode(value: &str) -> String {
	utf8_percent_encode(value, RFC3986).to_string()
}

/// Builds the signature base string from the method, the URL (query included), and any extra
/// protocol or body parameters.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	let mut pairs = url
		.query_pairs()
		.map(|(key, value)| (encode(&key), encode(&value)))
		.chain(params.iter().map(|(key, value)| (encode(key), encode(value))))
		.collect::<Vec<_>>();

	pairs.sort();

	let normalized =
		pairs.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");

	format!("{}&{}&{}", method.to_ascii_uppercase(), encode(base_url.as_str()), encode(&normalized))
}

/// Computes the base64 HMAC-SHA1 signature for a base string.
pub fn sign(
	base: &str,
	consumer_secret: &str,
	token_secret: Option<&str>,
) -> Result<String, TransportError> {
	let key = format!("{}&{}", encode(consumer_secret), encode(token_secret.unwrap_or_default()));
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| TransportError::Signing)?;

	mac.update(base.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn random_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
