//! Translation from canonical profile attributes to Xing users-API field names.
//!
//! Callers describe the profile they want with canonical names (`emails`, `photos`, ...). The
//! users API expects its own field identifiers in a comma-separated `fields` parameter, so
//! [`translate`] maps each canonical name through a fixed table, passes unknown names through
//! verbatim (Xing exposes many fields with no canonical equivalent), and always leads with the
//! fields the normalizer needs.

// self
use crate::_prelude::*;

/// Provider fields requested on every profile fetch, in this order.
pub const MANDATORY_FIELDS: [&str; 4] = ["id", "first_name", "last_name", "display_name"];

/// Canonical attributes requested when the configuration names none.
pub const DEFAULT_CANONICAL_FIELDS: [CanonicalField; 6] = [
	CanonicalField::Emails,
	CanonicalField::Username,
	CanonicalField::ProfileUrl,
	CanonicalField::Gender,
	CanonicalField::Photos,
	CanonicalField::Birthday,
];

/// Canonical profile attributes with a known Xing counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
	/// Provider-assigned identifier.
	Id,
	/// Structured given + family name.
	Name,
	/// Preformatted display name.
	DisplayName,
	/// E-mail addresses.
	Emails,
	/// Profile photos keyed by size.
	Photos,
	/// Public profile URL.
	ProfileUrl,
	/// Gender marker.
	Gender,
	/// Vanity page name.
	Username,
	/// Birth date.
	Birthday,
}
impl CanonicalField {
	/// Every mapped attribute.
	pub const ALL: [CanonicalField; 9] = [
		CanonicalField::Id,
		CanonicalField::Name,
		CanonicalField::DisplayName,
		CanonicalField::Emails,
		CanonicalField::Photos,
		CanonicalField::ProfileUrl,
		CanonicalField::Gender,
		CanonicalField::Username,
		CanonicalField::Birthday,
	];

	/// Returns the canonical attribute name.
	pub const fn as_str(self) -> &'static str {
		match self {
			CanonicalField::Id => "id",
			CanonicalField::Name => "name",
			CanonicalField::DisplayName => "displayName",
			CanonicalField::Emails => "emails",
			CanonicalField::Photos => "photos",
			CanonicalField::ProfileUrl => "profileUrl",
			CanonicalField::Gender => "gender",
			CanonicalField::Username => "username",
			CanonicalField::Birthday => "birthday",
		}
	}

	/// Returns the provider fields backing this attribute, in request order.
	pub const fn provider_fields(self) -> &'static [&'static str] {
		match self {
			CanonicalField::Id => &["id"],
			CanonicalField::Name => &["first_name", "last_name"],
			CanonicalField::DisplayName => &["display_name"],
			CanonicalField::Emails => &["active_email"],
			CanonicalField::Photos => &["photo_urls"],
			CanonicalField::ProfileUrl => &["permalink"],
			CanonicalField::Gender => &["gender"],
			CanonicalField::Username => &["page_name"],
			CanonicalField::Birthday => &["birth_date"],
		}
	}

	/// Looks up a canonical attribute by its exact name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.as_str() == name)
	}
}
impl Display for CanonicalField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Deduplicated, order-preserving list of provider fields to request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProviderFieldList(Vec<String>);
impl ProviderFieldList {
	/// Iterates the provider field names in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Number of distinct fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Always false; the mandatory prefix is never empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Value of the `fields` query parameter.
	pub fn query_value(&self) -> String {
		self.0.join(",")
	}
}
impl Display for ProviderFieldList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.query_value())
	}
}

/// Maps requested canonical attributes into the provider field list.
pub fn translate<I, S>(requested: I) -> ProviderFieldList
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut seen = HashSet::new();
	let mut fields = Vec::new();
	let mut push = |name: &str| {
		if seen.insert(name.to_owned()) {
			fields.push(name.to_owned());
		}
	};

	MANDATORY_FIELDS.into_iter().for_each(&mut push);

	for entry in requested {
		let entry = entry.as_ref();

		match CanonicalField::from_name(entry) {
			Some(field) => field.provider_fields().iter().copied().for_each(&mut push),
			None => push(entry),
		}
	}

	ProviderFieldList(fields)
}

/// Field list used when no explicit profile fields are configured.
pub fn default_field_list() -> ProviderFieldList {
	translate(DEFAULT_CANONICAL_FIELDS.iter().map(|field| field.as_str()))
}
