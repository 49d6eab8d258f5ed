//! Internal OAuth client facade over the `oauth2` crate.
//!
//! The provider serves the two grants from different URLs (`/oauth/v2/token` for the
//! authorization-code exchange, `/oauth/v2/refresh` for refreshes), so the facade is built per
//! grant with the matching token URL. Client credentials always travel in the form body.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RefreshToken, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{Token, TokenSecret, TokenSource},
	config::OAuthCredentials,
	error::{AuthError, ConfigError, TransportError},
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

const TARGET: &str = "the token endpoint";

/// OAuth 2.0 grant types the token manager can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Exchange an authorization code for an access/refresh token pair.
	AuthorizationCode,
	/// Mint a new access token from a refresh token.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	fn token_source(self) -> TokenSource {
		match self {
			GrantType::AuthorizationCode => TokenSource::AuthorizationCode,
			GrantType::RefreshToken => TokenSource::RefreshToken,
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

pub(crate) struct BasicFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
}
impl<C> BasicFacade<C>
where
	C: ?Sized + TokenHttpClient,
{
	pub(crate) fn from_credentials(
		credentials: &OAuthCredentials,
		token_url: Url,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(credentials.endpoints.authorization.to_string())
			.map_err(|source| ConfigError::invalid_url(&credentials.endpoints.authorization, source))?;
		let token_url = TokenUrl::new(token_url.to_string())
			.map_err(|source| ConfigError::invalid_url(&token_url, source))?;
		let redirect_url = RedirectUrl::new(credentials.redirect_uri.to_string())
			.map_err(|source| ConfigError::invalid_url(&credentials.redirect_uri, source))?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
			.set_client_secret(ClientSecret::new(credentials.client_secret.expose().to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client: http_client.into() })
	}

	pub(crate) async fn exchange_authorization_code(&self, code: &TokenSecret) -> Result<Token> {
		const GRANT: GrantType = GrantType::AuthorizationCode;

		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.expose().to_owned()))
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(GRANT, meta.take(), err))?;

		Ok(map_token_response(GRANT, response, None))
	}

	pub(crate) async fn refresh_token(&self, refresh_token: &TokenSecret) -> Result<Token> {
		const GRANT: GrantType = GrantType::RefreshToken;

		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
		let response = self
			.oauth_client
			.exchange_refresh_token(&refresh_secret)
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(GRANT, meta.take(), err))?;

		Ok(map_token_response(GRANT, response, Some(refresh_token)))
	}
}

// Refresh responses usually omit the refresh token; the one used stays valid.
fn map_token_response(
	grant: GrantType,
	response: BasicTokenResponse,
	carried_refresh: Option<&TokenSecret>,
) -> Token {
	let mut builder = Token::builder(grant.token_source(), response.access_token().secret().as_str())
		.issued_at(OffsetDateTime::now_utc());

	if let Some(expires_in) = response.expires_in().and_then(|value| Duration::try_from(value).ok())
	{
		builder = builder.expires_in(expires_in);
	}

	match (response.refresh_token(), carried_refresh) {
		(Some(issued), _) => builder = builder.refresh_token(issued.secret().as_str()),
		(None, Some(carried)) => builder = builder.refresh_token(carried.clone()),
		(None, None) => {},
	}

	builder.build()
}

fn map_request_error<E>(
	grant: GrantType,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.as_ref().and_then(|value| value.status);
	let rejected = status.is_some_and(|code| !(200..=299).contains(&code));

	match err {
		RequestTokenError::ServerResponse(response) => {
			let body = meta.as_ref().and_then(ResponseMetadata::body_text).unwrap_or_else(|| {
				serde_json::to_string(&response)
					.unwrap_or_else(|_| response.error().as_ref().to_owned())
			});

			AuthError::Rejected { grant, status, body }.into()
		},
		RequestTokenError::Request(error) => map_transport_error(error),
		RequestTokenError::Parse(source, body) => {
			let body = String::from_utf8_lossy(&body).into_owned();

			if rejected {
				AuthError::Rejected { grant, status, body }.into()
			} else {
				AuthError::MalformedResponse { grant, status, body, source }.into()
			}
		},
		// Wrong content type or empty body; `oauth2` keeps only a message.
		RequestTokenError::Other(message) => {
			let body = meta.as_ref().and_then(ResponseMetadata::body_text);

			match body {
				Some(body) if rejected => AuthError::Rejected { grant, status, body }.into(),
				body => AuthError::Unexpected { grant, status, message, body }.into(),
			}
		},
	}
}

fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(TARGET, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { target: TARGET, message }.into(),
		_ => TransportError::Other {
			target: TARGET,
			message: "Unrecognized HTTP client error.".into(),
		}
		.into(),
	}
}
