// crates.io
use httpmock::prelude::*;
// self
use xing_oauth::{
	_preludet::*,
	auth::AccessToken,
	config::XingConfig,
	error::{BoxError, Error, ExchangeStage, TransportError},
	flows::{AuthOutcome, InboundRequest},
	oauth::{OAuth1Client, ReqwestOAuth1Client},
	profile::Profile,
};

const PROFILE_FIELDS: &str = "id,first_name,last_name,display_name,active_email,photo_urls";
const PROFILE_BODY: &str = r#"{"users":[{
	"id": "X1",
	"first_name": "Jared",
	"last_name": "Hanson",
	"display_name": "Jared Hanson",
	"active_email": "jaredhanson@example.com",
	"photo_urls": {
		"large": "https://x1.xingassets.com/img/users/large.jpg",
		"thumb": "https://x1.xingassets.com/img/users/thumb.jpg"
	}
}]}"#;

fn build_config(server: &MockServer) -> XingConfig {
	XingConfig::builder("consumer-key", "consumer-secret")
		.callback_url("https://www.example.net/auth/xing/callback")
		.request_token_url(server.url("/v1/request_token"))
		.access_token_url(server.url("/v1/access_token"))
		.user_authorization_url(server.url("/v1/authorize"))
		.profile_url(server.url("/v1/users/me.json"))
		.profile_fields(["emails", "photos"])
		.build()
		.expect("Mock provider configuration should build successfully.")
}

async fn user_id(_token: AccessToken, profile: Profile) -> Result<Option<String>, BoxError> {
	Ok(Some(profile.id))
}

#[tokio::test]
async fn full_flow_against_mock_provider() {
	let server = MockServer::start_async().await;
	let config = build_config(&server);
	let (authenticator, store) = build_reqwest_test_authenticator(config, user_id);
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/request_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-1&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/access_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=access-1&oauth_token_secret=access-secret&user_id=X1");
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/users/me.json")
				.query_param("fields", PROFILE_FIELDS)
				.header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;
	let outcome = authenticator
		.authenticate(&InboundRequest::default().with_session("sid-1"))
		.await
		.expect("Starting an attempt against the mock provider should succeed.");
	let AuthOutcome::Redirect(redirect) = outcome else {
		panic!("Expected a redirect outcome, got {outcome:?}.");
	};

	assert_eq!(
		redirect.location.as_str(),
		format!("{}?oauth_token=req-1", server.url("/v1/authorize"))
	);
	assert_eq!(store.pending(), 1);

	let outcome = authenticator
		.authenticate(
			&InboundRequest::from_query("oauth_token=req-1&oauth_verifier=4711").with_session("sid-1"),
		)
		.await
		.expect("Completing the attempt against the mock provider should succeed.");

	assert!(matches!(outcome, AuthOutcome::Authenticated(ref id) if id == "X1"));
	assert_eq!(store.pending(), 0);

	request_token_mock.assert_calls_async(1).await;
	access_token_mock.assert_calls_async(1).await;
	profile_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn denial_never_reaches_the_provider() {
	let server = MockServer::start_async().await;
	let config = build_config(&server);
	let (authenticator, store) = build_reqwest_test_authenticator(config, user_id);
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/request_token");
			then.status(500);
		})
		.await;
	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/access_token");
			then.status(500);
		})
		.await;
	let err = authenticator
		.authenticate(&InboundRequest::from_query("oauth_problem=user_refused"))
		.await
		.expect_err("A denial callback should fail.");

	assert!(matches!(err, Error::AuthorizationDenied { .. }));
	assert_eq!(store.pending(), 0);

	request_token_mock.assert_calls_async(0).await;
	access_token_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn request_token_rejection_is_reported_with_stage() {
	let server = MockServer::start_async().await;
	let config = build_config(&server);
	let (authenticator, store) = build_reqwest_test_authenticator(config, user_id);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/request_token");
			then.status(401).body("oauth_problem=signature_invalid");
		})
		.await;
	let err = authenticator
		.authenticate(&InboundRequest::default().with_session("sid-1"))
		.await
		.expect_err("A rejected request-token call should fail the attempt.");

	assert!(matches!(
		err,
		Error::ProviderCommunication {
			stage: ExchangeStage::RequestToken,
			source: TransportError::Status { status: 401, .. },
		}
	));
	assert_eq!(store.pending(), 0);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn signed_get_returns_raw_body() {
	let server = MockServer::start_async().await;
	let config = build_config(&server);
	let client = ReqwestOAuth1Client::with_http_client(&config, test_reqwest_http_client());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/users/me.json")
				.query_param("fields", PROFILE_FIELDS)
				.header_exists("authorization");
			then.status(200).body(PROFILE_BODY);
		})
		.await;
	let body = client
		.authenticated_get(
			&config.profile_request_url(),
			&AccessToken::new("access-1", "access-secret"),
		)
		.await
		.expect("Signed GET against the mock provider should succeed.");

	assert_eq!(body, PROFILE_BODY.as_bytes());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn signed_requests_do_not_follow_redirects() {
	let server = MockServer::start_async().await;
	let config = build_config(&server);
	let client = ReqwestOAuth1Client::with_http_client(&config, test_reqwest_http_client());
	let redirect_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/users/me.json");
			then.status(302).header("location", "/v1/elsewhere");
		})
		.await;
	let elsewhere_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/elsewhere");
			then.status(200).body(PROFILE_BODY);
		})
		.await;
	let err = client
		.authenticated_get(
			&config.profile_request_url(),
			&AccessToken::new("access-1", "access-secret"),
		)
		.await
		.expect_err("A redirect must surface instead of being followed.");

	assert!(matches!(err, TransportError::Status { status: 302, .. }));

	redirect_mock.assert_calls_async(1).await;
	elsewhere_mock.assert_calls_async(0).await;
}
