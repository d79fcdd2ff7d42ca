// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ExchangeStage,
	flows::{DelegatedAuthenticator, Verify},
	oauth::OAuth1Client,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	profile::{self, Profile},
};

impl<C, V> DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	/// Fetches `/users/me` with the configured field selection and normalizes the first record.
	///
	/// Transport failures become [`Error::ProviderCommunication`] at the profile stage.
	/// Normalization errors are returned unmodified.
	pub async fn user_profile(&self, token: &AccessToken) -> Result<Profile> {
		const KIND: FlowKind = FlowKind::Profile;

		let span = FlowSpan::new(KIND, "user_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.profile_request_url();
				let body = self
					.client
					.authenticated_get(&url, token)
					.await
					.map_err(|e| Error::communication(ExchangeStage::Profile, e))?;

				profile::normalize(&body)
			})
			.await;

		super::settle(KIND, &span, &result);

		result
	}
}
