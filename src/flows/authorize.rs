//! Consent-page URL that yields the authorization code the token exchange needs.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, flows::TokenManager, http::TokenHttpClient};

const STATE_LEN: usize = 32;

/// Consent-page URL plus the `state` value that must come back on the redirect.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// Fully-formed consent URL to open in a browser.
	pub url: Url,
	/// Opaque state value embedded in [`url`](Self::url).
	pub state: String,
}
impl AuthorizationRequest {
	/// Returns `true` when the redirect carried back the expected `state`.
	pub fn matches_state(&self, returned_state: &str) -> bool {
		returned_state == self.state
	}
}

impl<C> TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Builds the consent-page URL for the configured client, redirect URI, and scopes.
	pub fn authorization_request(&self) -> AuthorizationRequest {
		let state = random_string(STATE_LEN);
		let url = build_authorize_url(
			&self.credentials.endpoints.authorization,
			&self.credentials.client_id,
			&self.credentials.redirect_uri,
			&self.credentials.scopes,
			&state,
		);

		AuthorizationRequest { url, state }
	}
}

fn build_authorize_url(
	authorization: &Url,
	client_id: &str,
	redirect_uri: &Url,
	scopes: &[String],
	state: &str,
) -> Url {
	let mut url = authorization.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", client_id);
	pairs.append_pair("redirect_uri", redirect_uri.as_str());

	if !scopes.is_empty() {
		pairs.append_pair("scope", &scopes.join(" "));
	}

	pairs.append_pair("state", state);

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
