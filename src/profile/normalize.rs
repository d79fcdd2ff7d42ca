//! Users-API payload decoding into the canonical [`Profile`].
//!
//! Only the first element of `users` is read. Mandatory identity fields must be present;
//! everything else maps to `None` when missing or empty.

// crates.io
use serde_json::Map;
use time::Month;
// self
use crate::{
	_prelude::*,
	error::PayloadError,
	profile::{EmailKind, Profile, ProfileEmail, ProfileName, ProfilePhoto},
	provider::PROVIDER_NAME,
};

#[derive(Debug, Deserialize)]
struct XingUser {
	id: String,
	first_name: String,
	last_name: String,
	display_name: String,
	#[serde(default)]
	page_name: Option<String>,
	#[serde(default)]
	permalink: Option<String>,
	#[serde(default)]
	gender: Option<String>,
	#[serde(default)]
	active_email: Option<String>,
	#[serde(default)]
	private_address: Option<XingAddress>,
	#[serde(default)]
	business_address: Option<XingAddress>,
	#[serde(default)]
	birth_date: Option<XingBirthDate>,
	#[serde(default)]
	photo_urls: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
struct XingAddress {
	#[serde(default)]
	email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XingBirthDate {
	#[serde(default)]
	year: Option<i32>,
	#[serde(default)]
	month: Option<u8>,
	#[serde(default)]
	day: Option<u8>,
}
impl XingBirthDate {
	/// Builds a date only when all three components are present; `month` is 1-based.
	fn to_date(&self) -> Result<Option<Date>, PayloadError> {
		let (Some(year), Some(month), Some(day)) = (self.year, self.month, self.day) else {
			return Ok(None);
		};
		let month =
			Month::try_from(month).map_err(|source| PayloadError::InvalidBirthDate { source })?;

		Date::from_calendar_date(year, month, day)
			.map(Some)
			.map_err(|source| PayloadError::InvalidBirthDate { source })
	}
}

/// Parses a users-API response body and builds the canonical [`Profile`] from its first user.
///
/// # Errors
///
/// - [`Error::Parse`] when the body is not JSON.
/// - [`Error::MalformedPayload`] when `users` is missing or empty, when the first record lacks a
///   mandatory field or carries a mistyped one, or when the birth date is not a calendar date.
pub fn normalize(raw: &[u8]) -> Result<Profile> {
	let document: JsonValue =
		serde_json::from_slice(raw).map_err(|source| Error::Parse { source })?;
	let record = document
		.get("users")
		.and_then(JsonValue::as_array)
		.ok_or(PayloadError::MissingUsers)?
		.first()
		.ok_or(PayloadError::EmptyUsers)?
		.clone();
	let user: XingUser = serde_path_to_error::deserialize(&record)
		.map_err(|source| PayloadError::InvalidRecord { source })?;
	let birthday = match user.birth_date.as_ref() {
		Some(birth_date) => birth_date.to_date()?,
		None => None,
	};
	let emails = collect_emails(&user);
	let photos = user.photo_urls.as_ref().and_then(collect_photos);

	Ok(Profile {
		provider: PROVIDER_NAME.to_owned(),
		id: user.id,
		display_name: user.display_name,
		name: ProfileName { family_name: user.last_name, given_name: user.first_name },
		username: non_empty(user.page_name),
		profile_url: non_empty(user.permalink),
		gender: non_empty(user.gender),
		birthday,
		emails,
		photos,
		raw: String::from_utf8_lossy(raw).into_owned(),
		json: record,
	})
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.is_empty())
}

fn collect_emails(user: &XingUser) -> Option<Vec<ProfileEmail>> {
	let address_email = |address: &Option<XingAddress>| {
		address.as_ref().and_then(|address| address.email.clone()).filter(|email| !email.is_empty())
	};
	let sources = [
		(user.active_email.clone().filter(|email| !email.is_empty()), EmailKind::Home, true),
		(address_email(&user.private_address), EmailKind::Home, false),
		(address_email(&user.business_address), EmailKind::Work, false),
	];
	let emails = sources
		.into_iter()
		.filter_map(|(value, kind, primary)| value.map(|value| ProfileEmail { kind, value, primary }))
		.collect::<Vec<_>>();

	if emails.is_empty() { None } else { Some(emails) }
}

// `Map` keeps document order because serde_json is built with `preserve_order`.
fn collect_photos(urls: &Map<String, JsonValue>) -> Option<Vec<ProfilePhoto>> {
	let photos = urls
		.iter()
		.filter_map(|(size, url)| {
			url.as_str()
				.filter(|url| !url.is_empty())
				.map(|url| ProfilePhoto { kind: size.to_owned(), value: url.to_owned() })
		})
		.collect::<Vec<_>>();

	if photos.is_empty() { None } else { Some(photos) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const FULL_PAYLOAD: &str = r#"{ "users": [ { "active_email": "jaredhanson@example.com", "id": "_XX0XXX00X", "first_name": "Jared", "last_name": "Hanson", "display_name": "Jared Hanson", "gender": "m", "page_name": "Jared_HansonX", "birth_date": { "year": 1678, "month": 4, "day": 24 }, "photo_urls": { "large": "https://x1.xingassets.com/pubimg/users/c/140x185.jpg", "maxi_thumb": "https://x1.xingassets.com/pubimg/users/c/70x93.jpg", "medium_thumb": "https://x1.xingassets.com/pubimg/users/c/57x75.jpg", "mini_thumb": "https://x1.xingassets.com/pubimg/users/c/18x24.jpg", "thumb": "https://x1.xingassets.com/pubimg/users/c/30x40.jpg" }, "permalink": "https://www.xing.com/profile/Jared_HansonX" } ] }"#;

	fn user_payload(extra: &str) -> String {
		format!(
			r#"{{ "users": [ {{ "id": "_XX0XXX00X", "first_name": "Jared", "last_name": "Hanson", "display_name": "Jared Hanson"{extra} }} ] }}"#
		)
	}

	#[test]
	fn full_payload_populates_every_attribute() {
		let profile = normalize(FULL_PAYLOAD.as_bytes()).expect("Full payload should normalize.");

		assert_eq!(profile.provider, "xing");
		assert_eq!(profile.id, "_XX0XXX00X");
		assert_eq!(profile.display_name, "Jared Hanson");
		assert_eq!(profile.name.family_name, "Hanson");
		assert_eq!(profile.name.given_name, "Jared");
		assert_eq!(profile.username.as_deref(), Some("Jared_HansonX"));
		assert_eq!(
			profile.profile_url.as_deref(),
			Some("https://www.xing.com/profile/Jared_HansonX")
		);
		assert_eq!(profile.gender.as_deref(), Some("m"));
		assert_eq!(profile.primary_email(), Some("jaredhanson@example.com"));
		assert_eq!(
			profile.birthday,
			Some(Date::from_calendar_date(1678, Month::April, 24).expect("Valid fixture date."))
		);

		let photos = profile.photos.as_ref().expect("Photo map should produce photos.");
		let kinds = photos.iter().map(|photo| photo.kind.as_str()).collect::<Vec<_>>();

		assert_eq!(kinds, ["large", "maxi_thumb", "medium_thumb", "mini_thumb", "thumb"]);
		assert_eq!(photos[0].value, "https://x1.xingassets.com/pubimg/users/c/140x185.jpg");
		assert_eq!(photos[4].value, "https://x1.xingassets.com/pubimg/users/c/30x40.jpg");
		assert_eq!(profile.raw, FULL_PAYLOAD);
		assert_eq!(profile.json["page_name"], "Jared_HansonX");
	}

	#[test]
	fn photos_follow_document_order_not_sorted_order() {
		let payload = user_payload(
			r#", "photo_urls": { "thumb": "https://t", "large": "https://l", "mini_thumb": "https://m" }"#,
		);
		let profile = normalize(payload.as_bytes()).expect("Payload should normalize.");
		let kinds = profile
			.photos
			.expect("Photo map should produce photos.")
			.into_iter()
			.map(|photo| photo.kind)
			.collect::<Vec<_>>();

		assert_eq!(kinds, ["thumb", "large", "mini_thumb"]);
	}

	#[test]
	fn photo_maps_without_urls_leave_photos_absent() {
		let payload = user_payload(r#", "photo_urls": { "large": null, "thumb": "" }"#);
		let profile = normalize(payload.as_bytes()).expect("Payload should normalize.");

		assert_eq!(profile.photos, None);

		let payload = user_payload(r#", "photo_urls": { "large": null, "thumb": "https://t" }"#);
		let photos = normalize(payload.as_bytes())
			.expect("Payload should normalize.")
			.photos
			.expect("String URLs should produce photos.");

		assert_eq!(photos, [ProfilePhoto { kind: "thumb".into(), value: "https://t".into() }]);
	}

	#[test]
	fn all_email_sources_are_ordered_by_priority() {
		let payload = user_payload(
			r#", "business_address": { "email": "jared@example.biz" }, "private_address": { "email": "jared@example.name" }, "active_email": "jared@example.com""#,
		);
		let emails = normalize(payload.as_bytes())
			.expect("Payload should normalize.")
			.emails
			.expect("Three email sources should produce emails.");

		assert_eq!(
			emails,
			[
				ProfileEmail {
					kind: EmailKind::Home,
					value: "jared@example.com".into(),
					primary: true
				},
				ProfileEmail {
					kind: EmailKind::Home,
					value: "jared@example.name".into(),
					primary: false
				},
				ProfileEmail {
					kind: EmailKind::Work,
					value: "jared@example.biz".into(),
					primary: false
				},
			]
		);
	}

	#[test]
	fn address_emails_without_active_email_keep_order() {
		let payload = user_payload(
			r#", "business_address": { "email": "jared@example.biz" }, "private_address": { "email": "jared@example.name" }"#,
		);
		let emails = normalize(payload.as_bytes())
			.expect("Payload should normalize.")
			.emails
			.expect("Address emails should produce emails.");

		assert_eq!(emails.len(), 2);
		assert_eq!(emails[0].value, "jared@example.name");
		assert_eq!(emails[1].kind, EmailKind::Work);
		assert!(emails.iter().all(|email| !email.primary));
	}

	#[test]
	fn missing_email_sources_leave_emails_absent() {
		let payload = user_payload(r#", "private_address": { "city": "Hamburg" }"#);
		let profile = normalize(payload.as_bytes()).expect("Payload should normalize.");

		assert_eq!(profile.emails, None);
		assert_eq!(profile.photos, None);
		assert_eq!(profile.birthday, None);
	}

	#[test]
	fn empty_optional_strings_are_treated_as_absent() {
		let payload =
			user_payload(r#", "page_name": "", "permalink": "", "gender": "", "active_email": """#);
		let profile = normalize(payload.as_bytes()).expect("Payload should normalize.");

		assert_eq!(profile.username, None);
		assert_eq!(profile.profile_url, None);
		assert_eq!(profile.gender, None);
		assert_eq!(profile.emails, None);
	}

	#[test]
	fn partial_birth_date_is_ignored() {
		let payload = user_payload(r#", "birth_date": { "year": null, "month": 4, "day": 24 }"#);
		let profile = normalize(payload.as_bytes()).expect("Payload should normalize.");

		assert_eq!(profile.birthday, None);
	}

	#[test]
	fn out_of_range_birth_date_is_malformed() {
		for birth_date in [
			r#", "birth_date": { "year": 1678, "month": 13, "day": 24 }"#,
			r#", "birth_date": { "year": 1678, "month": 0, "day": 24 }"#,
			r#", "birth_date": { "year": 1679, "month": 2, "day": 29 }"#,
		] {
			let err = normalize(user_payload(birth_date).as_bytes())
				.expect_err("Invalid dates should fail normalization.");

			assert!(matches!(
				err,
				Error::MalformedPayload(PayloadError::InvalidBirthDate { .. })
			));
		}
	}

	#[test]
	fn missing_or_empty_users_is_malformed() {
		let err = normalize(br#"{ "user": [] }"#).expect_err("Missing users should fail.");

		assert!(matches!(err, Error::MalformedPayload(PayloadError::MissingUsers)));

		let err = normalize(br#"{ "users": [] }"#).expect_err("Empty users should fail.");

		assert!(matches!(err, Error::MalformedPayload(PayloadError::EmptyUsers)));
	}

	#[test]
	fn mistyped_record_reports_json_path() {
		let err = normalize(br#"{ "users": [ { "id": 7, "first_name": "J", "last_name": "H", "display_name": "J H" } ] }"#)
			.expect_err("Numeric identifiers should be rejected.");
		let Error::MalformedPayload(PayloadError::InvalidRecord { source }) = err else {
			panic!("Expected an invalid record error, got {err:?}.");
		};

		assert_eq!(source.path().to_string(), "id");
	}

	#[test]
	fn non_json_body_is_a_parse_error() {
		let err = normalize(b"<html>oops</html>").expect_err("HTML bodies should fail.");

		assert!(matches!(err, Error::Parse { .. }));
	}
}
