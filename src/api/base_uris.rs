//! `GET /baseUris`: account-specific hosts.

// self
use crate::{_prelude::*, api, error::ConfigError};

const API_PATH: &str = "api/rest/v6/";

/// Hosts assigned to the account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseUris {
	/// Host serving REST calls, e.g. `https://api.na1.adobesign.com/`.
	pub api_access_point: Url,
	/// Host serving the web application.
	pub web_access_point: Url,
}
impl BaseUris {
	/// Versioned REST base under [`api_access_point`](Self::api_access_point).
	pub fn api_base(&self) -> Result<Url, ConfigError> {
		let host = api::with_trailing_slash(self.api_access_point.clone());

		host.join(API_PATH).map_err(|source| ConfigError::invalid_url(&host, source))
	}
}
