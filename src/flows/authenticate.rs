//! Authorization state machine: begin, complete, or fail on denial.

// self
use crate::{
	_prelude::*,
	error::ExchangeStage,
	flows::{
		AuthOutcome, AuthorizationRedirect, DelegatedAuthenticator, InboundRequest, Phase, Verify,
	},
	oauth::OAuth1Client,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::StoreKey,
};

impl<C, V> DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	/// Handles one inbound request on the authentication route.
	///
	/// A non-empty `oauth_problem` parameter fails with [`Error::AuthorizationDenied`] before
	/// any collaborator is called. Every other request must carry a session handle, otherwise it
	/// fails with [`Error::MissingSession`]. A request carrying `oauth_token` completes the
	/// exchange started by the same session; anything else starts a new authorization and yields
	/// [`AuthOutcome::Redirect`].
	pub async fn authenticate(&self, request: &InboundRequest) -> Result<AuthOutcome<V::User>> {
		match request.phase() {
			Phase::Denied { problem } => {
				let span = FlowSpan::new(FlowKind::Callback, "authenticate");

				span.record_denial(problem);
				obs::record_flow_outcome(FlowKind::Callback, FlowOutcome::Denied);

				Err(Error::AuthorizationDenied { problem: problem.to_owned() })
			},
			Phase::Begin => {
				let session = request.session().ok_or(Error::MissingSession)?;

				self.begin_authorization(session).await.map(AuthOutcome::Redirect)
			},
			Phase::Callback { oauth_token, verifier } => {
				let session = request.session().ok_or(Error::MissingSession)?;

				self.complete_authorization(session, oauth_token, verifier).await
			},
		}
	}

	/// Obtains a request token, stores it for `session` under the configured session key, and
	/// returns the provider redirect.
	pub async fn begin_authorization(&self, session: &str) -> Result<AuthorizationRedirect> {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "begin_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request_token = self
					.client
					.begin_authorization(self.config.callback_url.as_ref())
					.await
					.map_err(|e| Error::communication(ExchangeStage::RequestToken, e))?;
				let location = self.config.endpoints.authorization_redirect(&request_token.token);
				let oauth_token = request_token.token.clone();
				let key = StoreKey::new(session, &self.config.session_key, &oauth_token);

				self.store.save(&key, request_token).await?;

				Ok(AuthorizationRedirect { location, oauth_token })
			})
			.await;

		super::settle(KIND, &span, &result);

		result
	}

	/// Completes an attempt from the provider callback.
	///
	/// Only a request token saved for `session` is accepted, so a callback link cannot be
	/// completed by another user agent. The stored token is consumed even when a later step
	/// fails, so a callback can never be replayed.
	pub async fn complete_authorization(
		&self,
		session: &str,
		oauth_token: &str,
		verifier: Option<&str>,
	) -> Result<AuthOutcome<V::User>> {
		const KIND: FlowKind = FlowKind::Callback;

		let span = FlowSpan::new(KIND, "complete_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let key = StoreKey::new(session, &self.config.session_key, oauth_token);
				let request_token = self
					.store
					.take(&key)
					.await?
					.ok_or(Error::UnknownRequestToken)?;
				let access_token = self
					.client
					.exchange_token(&request_token, verifier)
					.await
					.map_err(|e| Error::communication(ExchangeStage::AccessToken, e))?;
				let profile = self.user_profile(&access_token).await?;
				let user = self
					.verify
					.verify(access_token, profile)
					.await
					.map_err(|source| Error::Verify { source })?;

				Ok(match user {
					Some(user) => AuthOutcome::Authenticated(user),
					None => AuthOutcome::Rejected,
				})
			})
			.await;

		super::settle(KIND, &span, &result);

		result
	}
}
