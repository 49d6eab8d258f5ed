//! JSON configuration files: OAuth credentials, service endpoints, and request templates.
//!
//! Every file is decoded once into a typed value through [`load_json`]; failures carry the
//! offending path and, for shape mismatches, the JSON path of the field that did not decode.

// std
use std::fs;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// File name of the credentials consumed by every sample.
pub const CREDENTIALS_FILE: &str = "OAuthCredentials.json";
/// File name of the agreement template consumed by the sending samples.
pub const AGREEMENT_TEMPLATE_FILE: &str = "SendAgreement.json";

const DEFAULT_API_HOST: &str = "https://api.na1.adobesign.com/";
const DEFAULT_AUTHORIZATION: &str = "https://secure.na1.adobesign.com/public/oauth/v2";

/// Reads `path` and decodes it as JSON into `T`.
pub fn load_json<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
	T: DeserializeOwned,
{
	let path = path.as_ref();
	let bytes =
		fs::read(path).map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;

	parse_json(path, &bytes)
}

fn parse_json<T>(path: &Path, bytes: &[u8]) -> Result<T, ConfigError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
}

/// OAuth client registration plus whichever grant material the user pasted in.
///
/// Grant fields are consulted in the order `access_token`, `refresh_token`, `code`; see
/// [`TokenManager::access_token`](crate::flows::TokenManager::access_token).
#[derive(Clone, Debug, Deserialize)]
pub struct OAuthCredentials {
	/// OAuth application identifier.
	pub client_id: String,
	/// OAuth application secret.
	pub client_secret: TokenSecret,
	/// Redirect URI registered with the application.
	pub redirect_uri: Url,
	/// Authorization code returned to the redirect URI.
	#[serde(default, deserialize_with = "non_empty_secret")]
	pub code: Option<TokenSecret>,
	/// Refresh token minted by an earlier authorization-code exchange.
	#[serde(default, deserialize_with = "non_empty_secret")]
	pub refresh_token: Option<TokenSecret>,
	/// Access token used verbatim, skipping every grant.
	#[serde(default, deserialize_with = "non_empty_secret")]
	pub access_token: Option<TokenSecret>,
	/// Scopes requested on the consent page.
	#[serde(default)]
	pub scopes: Vec<String>,
	/// Hosts the samples talk to.
	#[serde(default)]
	pub endpoints: ServiceEndpoints,
}
impl OAuthCredentials {
	/// Loads credentials from a JSON file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		load_json(path)
	}
}

/// Hosts used for token exchange, base URI discovery, and the consent page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
	/// API host serving `/oauth/v2/*` and `/api/rest/v6/baseUris`.
	pub api_host: Url,
	/// Consent page that issues authorization codes.
	pub authorization: Url,
}
impl ServiceEndpoints {
	/// Authorization-code exchange endpoint.
	pub fn token_url(&self) -> Result<Url, ConfigError> {
		self.join("oauth/v2/token")
	}

	/// Refresh-token endpoint.
	pub fn refresh_url(&self) -> Result<Url, ConfigError> {
		self.join("oauth/v2/refresh")
	}

	/// Base URI discovery endpoint.
	pub fn base_uris_url(&self) -> Result<Url, ConfigError> {
		self.join("api/rest/v6/baseUris")
	}

	fn join(&self, path: &str) -> Result<Url, ConfigError> {
		self.api_host.join(path).map_err(|source| ConfigError::invalid_url(&self.api_host, source))
	}
}
impl Default for ServiceEndpoints {
	fn default() -> Self {
		Self {
			api_host: Url::parse(DEFAULT_API_HOST).expect("Default API host must parse."),
			authorization: Url::parse(DEFAULT_AUTHORIZATION)
				.expect("Default consent page must parse."),
		}
	}
}

// Sample files ship empty strings as placeholders; treat them as absent.
fn non_empty_secret<'de, D>(deserializer: D) -> Result<Option<TokenSecret>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = <Option<String>>::deserialize(deserializer)?;

	Ok(value.filter(|raw| !raw.trim().is_empty()).map(TokenSecret::new))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn parse<T>(raw: &str) -> Result<T, ConfigError>
	where
		T: DeserializeOwned,
	{
		parse_json(Path::new("inline.json"), raw.as_bytes())
	}

	#[test]
	fn credentials_apply_endpoint_defaults_and_drop_placeholders() {
		let credentials: OAuthCredentials = parse(
			r#"{
				"client_id": "client",
				"client_secret": "secret",
				"redirect_uri": "https://localhost/callback",
				"code": "",
				"refresh_token": "refresh-1"
			}"#,
		)
		.expect("Credentials fixture should parse.");

		assert!(credentials.code.is_none());
		assert!(credentials.access_token.is_none());
		assert_eq!(credentials.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-1"));
		assert_eq!(credentials.endpoints, ServiceEndpoints::default());
		assert_eq!(
			credentials.endpoints.refresh_url().expect("Refresh URL should join.").as_str(),
			"https://api.na1.adobesign.com/oauth/v2/refresh"
		);
	}

	#[test]
	fn parse_errors_report_the_json_path() {
		let err = parse::<OAuthCredentials>(
			r#"{"client_id": "c", "client_secret": "s", "redirect_uri": "not a url"}"#,
		)
		.expect_err("Relative redirect URI should be rejected.");

		match err {
			ConfigError::Parse { source, .. } => assert_eq!(source.path().to_string(), "redirect_uri"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn missing_file_is_a_read_error() {
		let err = load_json::<OAuthCredentials>("definitely/not/here.json")
			.expect_err("Missing file should fail.");

		assert!(matches!(err, ConfigError::Read { .. }));
	}

	#[test]
	fn endpoint_urls_follow_the_api_host() {
		let endpoints = ServiceEndpoints {
			api_host: Url::parse("https://api.eu1.adobesign.com/").expect("Host should parse."),
			..ServiceEndpoints::default()
		};

		assert_eq!(
			endpoints.token_url().expect("Token URL should join.").as_str(),
			"https://api.eu1.adobesign.com/oauth/v2/token"
		);
		assert_eq!(
			endpoints.base_uris_url().expect("Base URI URL should join.").as_str(),
			"https://api.eu1.adobesign.com/api/rest/v6/baseUris"
		);
	}
}
