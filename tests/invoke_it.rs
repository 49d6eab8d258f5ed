#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use esign_samples::{
	_preludet::*,
	error::ApiError,
	http::ApiRequest,
};

fn url(server: &MockServer, path: &str) -> Url {
	Url::parse(&server.url(path)).expect("Mock URL should parse.")
}

#[tokio::test]
async fn headers_are_attached_verbatim_and_json_is_returned() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/rest/v6/users/me/groups")
				.header("authorization", "Bearer access-sample")
				.header("x-api-user", "email:someone@example.com");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "groupInfoList": [] }));
		})
		.await;
	let request = ApiRequest::get(url(&server, "/api/rest/v6/users/me/groups"))
		.authorization("Bearer access-sample")
		.header("x-api-user", "email:someone@example.com");
	let body = test_http_client().invoke(request).await.expect("2xx call should succeed.");

	mock.assert_async().await;

	assert_eq!(body, json!({ "groupInfoList": [] }));
}

#[tokio::test]
async fn json_body_is_sent_with_content_type() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/agreements")
				.header("content-type", "application/json")
				.json_body(json!({ "name": "NDA" }));
			then.status(201).json_body(json!({ "id": "agreement-1" }));
		})
		.await;
	let request = ApiRequest::post(url(&server, "/agreements")).json(json!({ "name": "NDA" }));
	let body = test_http_client().invoke(request).await.expect("201 call should succeed.");

	mock.assert_async().await;

	assert_eq!(body["id"], "agreement-1");
}

#[tokio::test]
async fn every_non_success_status_fails_for_get_and_post() {
	let server = MockServer::start_async().await;
	let client = test_http_client();

	for status in [400_u16, 401, 403, 404, 409, 500, 502] {
		let path = format!("/status/{status}");
		let mut mock = server
			.mock_async(|when, then| {
				when.path(path.as_str());
				then.status(status)
					.header("content-type", "application/json")
					.body("{\"code\":\"FAILED\",\"message\":\"Nope\"}");
			})
			.await;
		let requests = [
			ApiRequest::get(url(&server, &path)),
			ApiRequest::post(url(&server, &path)),
			ApiRequest::post(url(&server, &path)).json(json!({ "name": "NDA" })),
		];

		for request in requests {
			let method = request.method.clone();
			let err = client.invoke(request).await.expect_err("Non-2xx statuses must fail.");

			match err {
				Error::Api(api @ ApiError::Status { .. }) => {
					assert_eq!(api.status(), status, "{method} {path}");
					assert_eq!(api.body(), Some("{\"code\":\"FAILED\",\"message\":\"Nope\"}"));
				},
				other => panic!("Unexpected error for {method} {path}: {other:?}."),
			}
		}

		mock.assert_calls_async(3).await;
		mock.delete_async().await;
	}
}

#[tokio::test]
async fn success_without_json_is_malformed() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/baseUris");
			then.status(200).body("<html>maintenance</html>");
		})
		.await;

	let err = test_http_client()
		.invoke(ApiRequest::get(url(&server, "/baseUris")))
		.await
		.expect_err("HTML bodies must fail.");

	match err {
		Error::Api(api @ ApiError::MalformedBody { .. }) => {
			assert_eq!(api.status(), 200);
			assert_eq!(api.body(), Some("<html>maintenance</html>"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn empty_success_body_is_malformed() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/agreements");
			then.status(204);
		})
		.await;

	let err = test_http_client()
		.invoke(ApiRequest::post(url(&server, "/agreements")))
		.await
		.expect_err("Empty bodies must fail.");

	assert!(matches!(err, Error::Api(ApiError::MalformedBody { status: 204, .. })));
}

#[tokio::test]
async fn redirects_are_returned_as_status_errors() {
	let server = MockServer::start_async().await;
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/rest/v6/users/me/groups");
			then.status(302).header("location", "/elsewhere");
		})
		.await;
	let target = server
		.mock_async(|when, then| {
			when.path("/elsewhere");
			then.status(200).json_body(json!({ "groupInfoList": [] }));
		})
		.await;
	let err = test_http_client()
		.invoke(ApiRequest::get(url(&server, "/api/rest/v6/users/me/groups")))
		.await
		.expect_err("Redirects must not be followed.");

	redirect.assert_async().await;
	target.assert_calls_async(0).await;

	assert!(matches!(err, Error::Api(ApiError::Status { status: 302, .. })));
}

#[tokio::test]
async fn body_less_requests_announce_json() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/rest/v6/baseUris")
				.header("content-type", "application/json");
			then.status(200).json_body(json!({}));
		})
		.await;

	test_http_client()
		.invoke(ApiRequest::get(url(&server, "/api/rest/v6/baseUris")))
		.await
		.expect("Call should match the content-type expectation.");

	mock.assert_async().await;
}
