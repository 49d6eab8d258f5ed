//! Token acquisition orchestrated on top of the OAuth facade.

pub mod access_token;
pub mod authorize;

pub use access_token::*;
pub use authorize::*;

// self
use crate::{_prelude::*, config::OAuthCredentials, http::{ReqwestHttpClient, TokenHttpClient}};

/// Obtains the single access token a run uses to authorize every resource call.
///
/// The manager owns the loaded credentials and the token transport. It keeps no token state;
/// callers hold on to the [`Token`](crate::auth::Token) it returns.
#[derive(Clone)]
pub struct TokenManager<C = ReqwestHttpClient>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every token endpoint request.
	pub http_client: Arc<C>,
	/// Credentials loaded once per run.
	pub credentials: OAuthCredentials,
}
impl<C> TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a manager that reuses the caller-provided transport.
	pub fn with_http_client(credentials: OAuthCredentials, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), credentials }
	}
}
impl TokenManager<ReqwestHttpClient> {
	/// Creates a manager backed by a fresh non-redirecting reqwest transport.
	pub fn new(credentials: OAuthCredentials) -> Result<Self> {
		Ok(Self::with_http_client(credentials, ReqwestHttpClient::new()?))
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("client_id", &self.credentials.client_id)
			.field("endpoints", &self.credentials.endpoints)
			.field("access_token_set", &self.credentials.access_token.is_some())
			.field("refresh_token_set", &self.credentials.refresh_token.is_some())
			.field("code_set", &self.credentials.code.is_some())
			.finish()
	}
}
