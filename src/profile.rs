//! Canonical, provider-agnostic user profile built from Xing's users API.
//!
//! A [`Profile`] is constructed exactly once per successful profile fetch by [`normalize`] and
//! is handed to the verification callback by value. Optional attributes are `None` when Xing did
//! not supply them; empty collections are never produced.

pub mod normalize;

pub use normalize::*;

// self
use crate::_prelude::*;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Structured personal name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// Last name.
	pub family_name: String,
	/// First name.
	pub given_name: String,
}

/// E-mail classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
	/// Personal address.
	Home,
	/// Business address.
	Work,
}

/// E-mail entry in priority order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
	/// Address classification.
	#[serde(rename = "type")]
	pub kind: EmailKind,
	/// Address.
	pub value: String,
	/// Set only for the account's active address.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub primary: bool,
}

/// Photo URL for one provider size label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePhoto {
	/// Provider size label (`large`, `thumb`, ...).
	#[serde(rename = "type")]
	pub kind: String,
	/// Photo URL.
	pub value: String,
}

/// Canonical profile.
///
/// `raw` and `json` keep the provider response for diagnostics; they are skipped when the profile
/// is serialized and must not be shown to end users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Provider tag, always `xing`.
	pub provider: String,
	/// Provider-assigned user identifier.
	pub id: String,
	/// Display name.
	pub display_name: String,
	/// Structured name.
	pub name: ProfileName,
	/// Vanity page name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Public profile URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub profile_url: Option<String>,
	/// Gender marker as reported by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Birth date (UTC calendar date).
	#[serde(default, with = "calendar_date::option", skip_serializing_if = "Option::is_none")]
	pub birthday: Option<Date>,
	/// E-mail addresses, active first.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<ProfileEmail>>,
	/// Photos in provider document order.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub photos: Option<Vec<ProfilePhoto>>,
	/// Raw response body.
	#[serde(skip)]
	pub raw: String,
	/// Parsed source record (first element of `users`).
	#[serde(skip)]
	pub json: JsonValue,
}
impl Profile {
	/// Returns the primary e-mail address, if any.
	pub fn primary_email(&self) -> Option<&str> {
		self.emails
			.as_deref()?
			.iter()
			.find(|email| email.primary)
			.map(|email| email.value.as_str())
	}
}
