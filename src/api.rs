//! Typed accessors for the REST API v6 resources the samples use.
//!
//! [`SignApi`] binds a transport, the account's API base URL, and one access token. Each method
//! builds a single URL under that base and issues exactly one call through
//! [`ReqwestHttpClient::invoke_as`].

pub mod agreements;
pub mod base_uris;
pub mod groups;
pub mod library_documents;
pub mod transient_documents;

pub use agreements::*;
pub use base_uris::*;
pub use groups::*;
pub use library_documents::*;
pub use transient_documents::*;

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::ServiceEndpoints,
	error::ConfigError,
	http::{ApiRequest, ReqwestHttpClient},
};

/// Resource client bound to one API base URL and one access token.
#[derive(Clone, Debug)]
pub struct SignApi {
	http: ReqwestHttpClient,
	base: Url,
	token: Token,
}
impl SignApi {
	/// Looks up the account's API access point, then binds to `{apiAccessPoint}api/rest/v6/`.
	pub async fn discover(
		http: ReqwestHttpClient,
		endpoints: &ServiceEndpoints,
		token: Token,
	) -> Result<Self> {
		let request = ApiRequest::get(endpoints.base_uris_url()?)
			.stage("base_uris")
			.authorization(token.bearer());
		let base_uris = http.invoke_as::<BaseUris>(request).await?;
		let base = base_uris.api_base()?;

		Ok(Self::with_base(http, base, token))
	}

	/// Binds to a known API base URL without discovery.
	pub fn with_base(http: ReqwestHttpClient, base: Url, token: Token) -> Self {
		Self { http, base: with_trailing_slash(base), token }
	}

	/// API base every resource path is joined onto.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Access token sent with every call.
	pub fn token(&self) -> &Token {
		&self.token
	}

	fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base.join(path).map_err(|source| ConfigError::invalid_url(&self.base, source))
	}

	fn request(&self, method: Method, path: &str, stage: &'static str) -> Result<ApiRequest> {
		Ok(ApiRequest::new(method, self.endpoint(path)?)
			.stage(stage)
			.authorization(self.token.bearer()))
	}
}

// `Url::join` replaces the last segment unless the base ends with `/`.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url
}
