//! Sample clients for the e-signature REST API v6: OAuth token acquisition, base URI discovery,
//! group and library document lookup, transient document upload, and agreement sending.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod samples;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		api::SignApi,
		auth::Token,
		config::{OAuthCredentials, ServiceEndpoints},
		flows::TokenManager,
		http::ReqwestHttpClient,
	};

	/// Access token carried by [`mock_sign_api`].
	pub const MOCK_ACCESS_TOKEN: &str = "access-sample";

	/// Token manager type alias used by reqwest-backed integration tests.
	pub type ReqwestTestTokenManager = TokenManager<ReqwestHttpClient>;

	/// Endpoint set that routes every call to a local mock server rooted at `base`.
	pub fn mock_endpoints(base: &str) -> ServiceEndpoints {
		let api_host = Url::parse(&format!("{}/", base.trim_end_matches('/')))
			.expect("Failed to parse mock API host.");
		let authorization = api_host.join("public/oauth/v2").expect("Failed to join consent path.");

		ServiceEndpoints { api_host, authorization }
	}

	/// Credentials with no grant material; tests fill in the field under test.
	pub fn bare_credentials(endpoints: ServiceEndpoints) -> OAuthCredentials {
		OAuthCredentials {
			client_id: "client-sample".into(),
			client_secret: "secret-sample".into(),
			redirect_uri: Url::parse("https://localhost/callback")
				.expect("Failed to parse redirect URI fixture."),
			code: None,
			refresh_token: None,
			access_token: None,
			scopes: Vec::new(),
			endpoints,
		}
	}

	/// Builds a reqwest-backed token manager for the provided credentials.
	pub fn build_reqwest_test_token_manager(
		credentials: OAuthCredentials,
	) -> ReqwestTestTokenManager {
		TokenManager::with_http_client(credentials, test_http_client())
	}

	/// Non-redirecting reqwest transport used across integration tests.
	pub fn test_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::new().expect("Failed to build the reqwest test client.")
	}

	/// Resource client bound to `{base}/api/rest/v6/` with [`MOCK_ACCESS_TOKEN`].
	pub fn mock_sign_api(base: &str) -> SignApi {
		let api_base = mock_endpoints(base)
			.api_host
			.join("api/rest/v6/")
			.expect("Failed to join the versioned API path.");

		SignApi::with_base(
			test_http_client(),
			api_base,
			Token::configured(MOCK_ACCESS_TOKEN.into()),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::{Path, PathBuf},
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
#[cfg(any(test, feature = "cli"))] use tokio as _;
