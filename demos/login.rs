//! Signs a Xing user in from the terminal.
//!
//! Set `XING_CONSUMER_KEY` and `XING_CONSUMER_SECRET`, open the printed URL, authorize the
//! application, then paste either the full callback URL or the out-of-band verifier shown by
//! Xing.

// std
use std::{env, io, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::eyre};
use url::Url;
// self
use xing_oauth::{
	auth::AccessToken,
	config::XingConfig,
	error::BoxError,
	flows::{AuthOutcome, DelegatedAuthenticator, InboundRequest},
	profile::Profile,
	store::{MemoryStore, RequestTokenStore},
};

async fn greet(_token: AccessToken, profile: Profile) -> Result<Option<Profile>, BoxError> {
	Ok(Some(profile))
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut builder =
		XingConfig::builder(env::var("XING_CONSUMER_KEY")?, env::var("XING_CONSUMER_SECRET")?)
			.profile_fields(["emails", "photos", "birthday"]);

	if let Ok(callback) = env::var("XING_CALLBACK_URL") {
		builder = builder.callback_url(callback);
	}

	let session = "terminal";
	let store: Arc<dyn RequestTokenStore> = Arc::new(MemoryStore::default());
	let authenticator = DelegatedAuthenticator::with_reqwest(builder.build()?, store, greet)?;
	let AuthOutcome::Redirect(redirect) =
		authenticator.authenticate(&InboundRequest::default().with_session(session)).await?
	else {
		return Err(eyre!("A fresh attempt should always redirect."));
	};

	println!("Send your user to {}.", redirect.location);
	println!("Paste the callback URL or the verifier:");

	let mut line = String::new();

	io::stdin().read_line(&mut line)?;

	let line = line.trim();
	let callback = match Url::parse(line) {
		Ok(url) => InboundRequest::from_url(&url),
		Err(_) => InboundRequest::default()
			.with_param("oauth_token", redirect.oauth_token.as_str())
			.with_param("oauth_verifier", line),
	};

	match authenticator.authenticate(&callback.with_session(session)).await? {
		AuthOutcome::Authenticated(profile) => {
			println!("Signed in as {} ({}).", profile.display_name, profile.id);

			if let Some(email) = profile.primary_email() {
				println!("Primary e-mail: {email}.");
			}

			println!("{}", serde_json::to_string_pretty(&profile)?);
		},
		AuthOutcome::Rejected => println!("Verification rejected the profile."),
		AuthOutcome::Redirect(redirect) => println!("Unexpected redirect to {}.", redirect.location),
	}

	Ok(())
}
