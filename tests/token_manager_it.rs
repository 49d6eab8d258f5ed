#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
// self
use esign_samples::{
	_preludet::*,
	auth::{TokenSecret, TokenSource},
	error::AuthError,
	oauth::GrantType,
};

#[tokio::test]
async fn refresh_token_calls_only_the_refresh_endpoint() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.refresh_token = Some("refresh-sample".into());
	credentials.code = Some("stale-code".into());

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/v2/refresh")
				.header("content-type", "application/x-www-form-urlencoded")
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "refresh-sample")
				.form_urlencoded_tuple("client_id", "client-sample")
				.form_urlencoded_tuple("client_secret", "secret-sample");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"access-refreshed\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let exchange = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token");
			then.status(500);
		})
		.await;
	let token = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect("Refresh grant should succeed.");

	refresh.assert_calls_async(1).await;
	exchange.assert_calls_async(0).await;

	assert_eq!(token.access_token.expose(), "access-refreshed");
	assert_eq!(token.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-sample"));
	assert_eq!(token.source, TokenSource::RefreshToken);
	assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn authorization_code_is_exchanged_once() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.code = Some("code-sample".into());

	let exchange = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/v2/token")
				.form_urlencoded_tuple("grant_type", "authorization_code")
				.form_urlencoded_tuple("code", "code-sample")
				.form_urlencoded_tuple("redirect_uri", "https://localhost/callback")
				.form_urlencoded_tuple("client_id", "client-sample")
				.form_urlencoded_tuple("client_secret", "secret-sample");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"access-code\",\"refresh_token\":\"refresh-code\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let token = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect("Authorization code exchange should succeed.");

	exchange.assert_async().await;

	assert_eq!(token.access_token.expose(), "access-code");
	assert_eq!(token.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-code"));
	assert_eq!(token.source, TokenSource::AuthorizationCode);
}

#[tokio::test]
async fn rejected_refresh_reports_status_and_body() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.refresh_token = Some("revoked".into());

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/refresh");
			then.status(400).header("content-type", "application/json").body(
				"{\"error\":\"invalid_request\",\"error_description\":\"Invalid refresh token\"}",
			);
		})
		.await;
	let err = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect_err("Rejected refresh must fail.");

	refresh.assert_async().await;

	match err {
		Error::Auth(auth @ AuthError::Rejected { grant: GrantType::RefreshToken, .. }) => {
			assert_eq!(auth.status(), Some(400));
			assert!(auth.body().is_some_and(|body| body.contains("invalid_request")));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn success_without_access_token_is_malformed() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.code = Some("code-sample".into());

	let exchange = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"Bearer\",\"expires_in\":3600}");
		})
		.await;
	let err = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect_err("A response without an access token must fail.");

	exchange.assert_async().await;

	match err {
		Error::Auth(auth @ AuthError::MalformedResponse { .. }) => {
			assert_eq!(auth.status(), Some(200));
			assert!(auth.body().is_some_and(|body| body.contains("expires_in")));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn non_json_error_page_is_rejected_with_status() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.code = Some("code-sample".into());

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token");
			then.status(503).body("<html>maintenance</html>");
		})
		.await;

	let err = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect_err("Error pages must fail.");

	match err {
		Error::Auth(auth @ AuthError::Rejected { .. }) => {
			assert_eq!(auth.status(), Some(503));
			assert_eq!(auth.body(), Some("<html>maintenance</html>"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn non_json_success_keeps_status_and_body() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.code = Some("code-sample".into());

	let exchange = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token");
			then.status(200).header("content-type", "text/html").body("<html>login page</html>");
		})
		.await;
	let err = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect_err("HTML token responses must fail.");

	exchange.assert_async().await;

	match err {
		Error::Auth(auth) => {
			assert_eq!(auth.status(), Some(200));
			assert_eq!(auth.body(), Some("<html>login page</html>"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn redirected_refresh_is_not_reposted() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.refresh_token = Some("refresh-sample".into());

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/refresh");
			then.status(307).header("location", "/captured");
		})
		.await;
	let captured = server
		.mock_async(|when, then| {
			when.path("/captured");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"stolen\",\"token_type\":\"Bearer\"}",
			);
		})
		.await;
	let err = build_reqwest_test_token_manager(credentials)
		.access_token()
		.await
		.expect_err("Redirected token calls must fail.");

	refresh.assert_async().await;
	captured.assert_calls_async(0).await;

	match err {
		Error::Auth(auth @ AuthError::Rejected { .. }) => assert_eq!(auth.status(), Some(307)),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn authorization_request_targets_the_consent_page() {
	let server = MockServer::start_async().await;
	let mut credentials = bare_credentials(mock_endpoints(&server.base_url()));

	credentials.scopes = vec!["user_read:self".into(), "agreement_write:self".into()];

	let request = build_reqwest_test_token_manager(credentials).authorization_request();
	let pairs = request.url.query_pairs().into_owned().collect::<BTreeMap<_, _>>();

	assert_eq!(request.url.path(), "/public/oauth/v2");
	assert_eq!(pairs.get("client_id").map(String::as_str), Some("client-sample"));
	assert_eq!(pairs.get("scope").map(String::as_str), Some("user_read:self agreement_write:self"));
	assert_eq!(pairs.get("state"), Some(&request.state));
	assert!(request.matches_state(&request.state));
	assert!(!request.matches_state("forged"));
}
