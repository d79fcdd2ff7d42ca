//! Delegated authentication orchestrated over an [`OAuth1Client`] collaborator.
//!
//! One call to [`DelegatedAuthenticator::authenticate`] handles one inbound request. The request
//! is classified first: a provider denial fails immediately without touching the network, a
//! callback carrying `oauth_token` completes the exchange, and anything else starts a new
//! authorization by obtaining a request token and redirecting the user.

mod authenticate;
pub mod callback;
mod profile;

pub use callback::*;

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::XingConfig,
	error::BoxError,
	oauth::OAuth1Client,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	profile::Profile,
	store::RequestTokenStore,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, oauth::ReqwestOAuth1Client};

#[cfg(feature = "reqwest")]
/// Authenticator specialized for the crate's default reqwest transport stack.
pub type ReqwestAuthenticator<V> = DelegatedAuthenticator<ReqwestOAuth1Client, V>;

/// Future returned by [`Verify::verify`].
pub type VerifyFuture<U> = Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + Send>>;

/// Caller-supplied verification step that turns a normalized profile into an application user.
///
/// Returning `Ok(None)` rejects the attempt without an error. The trait is implemented for any
/// `Fn(AccessToken, Profile) -> impl Future<Output = Result<Option<U>, BoxError>>`.
pub trait Verify
where
	Self: Send + Sync,
{
	/// Application user produced on success.
	type User: Send;

	/// Maps the access token and profile into an application user.
	fn verify(&self, token: AccessToken, profile: Profile) -> VerifyFuture<Self::User>;
}
impl<F, Fut, U> Verify for F
where
	F: Send + Sync + Fn(AccessToken, Profile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
	U: Send,
{
	type User = U;

	fn verify(&self, token: AccessToken, profile: Profile) -> VerifyFuture<U> {
		Box::pin(self(token, profile))
	}
}

/// Terminal, non-error result of an authentication attempt.
#[derive(Debug)]
pub enum AuthOutcome<U> {
	/// Send the user agent to the provider.
	Redirect(AuthorizationRedirect),
	/// Verification accepted the profile.
	Authenticated(U),
	/// Verification declined the profile.
	Rejected,
}

/// Redirect instruction produced when an attempt starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRedirect {
	/// User-authorization URL carrying the request token.
	pub location: Url,
	/// Public request-token identifier stored for the callback.
	pub oauth_token: String,
}

/// Authenticates users against Xing by delegating the OAuth 1.0a protocol to `C`.
///
/// The configuration is immutable after construction and shared by reference across
/// concurrent attempts; the request-token store is the only shared mutable state and
/// synchronizes internally.
pub struct DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	/// Validated static configuration.
	pub config: Arc<XingConfig>,
	/// OAuth 1.0a collaborator performing every network call.
	pub client: Arc<C>,
	/// Storage for request tokens awaiting the provider callback.
	pub store: Arc<dyn RequestTokenStore>,
	verify: Arc<V>,
}
impl<C, V> DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	/// Creates an authenticator from its configuration and collaborators.
	pub fn new(
		config: impl Into<Arc<XingConfig>>,
		client: impl Into<Arc<C>>,
		store: Arc<dyn RequestTokenStore>,
		verify: V,
	) -> Self {
		Self { config: config.into(), client: client.into(), store, verify: Arc::new(verify) }
	}
}
#[cfg(feature = "reqwest")]
impl<V> DelegatedAuthenticator<ReqwestOAuth1Client, V>
where
	V: Verify,
{
	/// Creates an authenticator that provisions its own reqwest-backed OAuth 1.0a client.
	pub fn with_reqwest(
		config: XingConfig,
		store: Arc<dyn RequestTokenStore>,
		verify: V,
	) -> Result<Self, ConfigError> {
		let client = ReqwestOAuth1Client::new(&config)?;

		Ok(Self::new(config, client, store, verify))
	}
}
impl<C, V> Clone for DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			client: self.client.clone(),
			store: self.store.clone(),
			verify: self.verify.clone(),
		}
	}
}
impl<C, V> Debug for DelegatedAuthenticator<C, V>
where
	C: ?Sized + OAuth1Client,
	V: Verify,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DelegatedAuthenticator").field("config", &self.config).finish()
	}
}

/// Records the terminal outcome of a phase on the metrics counter and the span.
pub(crate) fn settle<T>(kind: FlowKind, span: &FlowSpan, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(err) => {
			span.record_failure(err);
			obs::record_flow_outcome(kind, FlowOutcome::Failure);
		},
	}
}
