//! Access token acquisition: configured literal, refresh grant, or authorization-code grant.
//!
//! [`TokenManager::access_token`] walks the credentials in a fixed order and stops at the first
//! usable entry, so a pasted access token never touches the network and a refresh token always
//! wins over a (probably stale) authorization code.

// self
use crate::{
	_prelude::*,
	auth::{Token, TokenSecret},
	config::OAuthCredentials,
	error::ConfigError,
	flows::TokenManager,
	http::TokenHttpClient,
	oauth::BasicFacade,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Grant material selected from the credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPlan<'a> {
	/// Use the configured access token verbatim.
	Configured(&'a TokenSecret),
	/// Call the refresh endpoint with this refresh token.
	Refresh(&'a TokenSecret),
	/// Exchange this authorization code at the token endpoint.
	AuthorizationCode(&'a TokenSecret),
}
impl<'a> TokenPlan<'a> {
	/// Picks the first applicable entry: access token, then refresh token, then code.
	pub fn select(credentials: &'a OAuthCredentials) -> Result<Self, ConfigError> {
		if let Some(token) = credentials.access_token.as_ref() {
			return Ok(Self::Configured(token));
		}
		if let Some(refresh) = credentials.refresh_token.as_ref() {
			return Ok(Self::Refresh(refresh));
		}

		credentials
			.code
			.as_ref()
			.map(Self::AuthorizationCode)
			.ok_or(ConfigError::MissingAuthorizationCode)
	}
}

impl<C> TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Returns the access token for this run.
	///
	/// Fails with [`AuthError`](crate::error::AuthError) when the token endpoint rejects the
	/// grant or answers without an access token.
	pub async fn access_token(&self) -> Result<Token> {
		const KIND: CallKind = CallKind::AccessToken;

		let span = CallSpan::new(KIND, "access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.acquire()).await;

		obs::record_result(KIND, &result);

		result
	}

	async fn acquire(&self) -> Result<Token> {
		match TokenPlan::select(&self.credentials)? {
			TokenPlan::Configured(token) => {
				obs::debug_event("Using the configured access token.");

				Ok(Token::configured(token.clone()))
			},
			TokenPlan::Refresh(refresh) => self.refresh_access_token(refresh).await,
			TokenPlan::AuthorizationCode(code) => self.exchange_authorization_code(code).await,
		}
	}

	/// Mints a new access token with the `refresh_token` grant.
	pub async fn refresh_access_token(&self, refresh_token: &TokenSecret) -> Result<Token> {
		let refresh_url = self.credentials.endpoints.refresh_url()?;

		obs::debug_event("Refreshing the access token.");

		self.facade(refresh_url)?.refresh_token(refresh_token).await
	}

	/// Exchanges an authorization code with the `authorization_code` grant.
	pub async fn exchange_authorization_code(&self, code: &TokenSecret) -> Result<Token> {
		let token_url = self.credentials.endpoints.token_url()?;

		obs::debug_event("Exchanging the authorization code.");

		self.facade(token_url)?.exchange_authorization_code(code).await
	}

	fn facade(&self, token_url: Url) -> Result<BasicFacade<C>> {
		BasicFacade::from_credentials(&self.credentials, token_url, self.http_client.clone())
	}
}
