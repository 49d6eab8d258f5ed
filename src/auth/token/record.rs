//! Immutable access token records and their builder.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Where a [`Token`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
	/// Access token pasted into the credentials file and used verbatim.
	Configured,
	/// Minted by the refresh-token grant.
	RefreshToken,
	/// Minted by the authorization-code grant.
	AuthorizationCode,
}
impl TokenSource {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenSource::Configured => "configured",
			TokenSource::RefreshToken => "refresh_token",
			TokenSource::AuthorizationCode => "authorization_code",
		}
	}
}
impl Display for TokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Access token authorizing every API call of a run.
///
/// Records are never mutated; a refresh produces a new record.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if one was issued or configured.
	pub refresh_token: Option<TokenSecret>,
	/// Expiry instant derived from `expires_in`, when the token endpoint supplied it.
	pub expires_at: Option<OffsetDateTime>,
	/// Grant (or configuration) that produced this token.
	pub source: TokenSource,
}
impl Token {
	/// Returns a builder for a token minted by `source`.
	pub fn builder(source: TokenSource, access_token: impl Into<TokenSecret>) -> TokenBuilder {
		TokenBuilder::new(source, access_token.into())
	}

	/// Wraps a literal access token without expiry information.
	pub fn configured(access_token: TokenSecret) -> Self {
		Self::builder(TokenSource::Configured, access_token).build()
	}

	/// Value for the `Authorization` header.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.field("source", &self.source)
			.finish()
	}
}

/// Builder for [`Token`].
#[derive(Clone, Debug)]
pub struct TokenBuilder {
	source: TokenSource,
	access_token: TokenSecret,
	refresh_token: Option<TokenSecret>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl TokenBuilder {
	fn new(source: TokenSource, access_token: TokenSecret) -> Self {
		Self { source, access_token, refresh_token: None, issued_at: None, expires_in: None }
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}

	/// Sets the issued-at instant used to anchor `expires_in`.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`Token`].
	pub fn build(self) -> Token {
		let expires_at = self.expires_in.map(|delta| {
			self.issued_at.unwrap_or_else(OffsetDateTime::now_utc).saturating_add(delta)
		});

		Token {
			access_token: self.access_token,
			refresh_token: self.refresh_token,
			expires_at,
			source: self.source,
		}
	}
}
