//! Crate-level error types shared by the token manager, the HTTP invoker, and the samples.

// self
use crate::{_prelude::*, oauth::GrantType};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// A resource call returned a non-2xx status or an unusable body.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// An expected list element was absent.
	#[error(transparent)]
	NotFound(#[from] NotFoundError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A configuration file could not be read.
	#[error("Failed to read {}.", .path.display())]
	Read {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// A configuration file is not valid JSON or does not match the expected shape.
	#[error("Failed to parse {} at `{}`.", .path.display(), .source.path())]
	Parse {
		/// File that failed to parse.
		path: PathBuf,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A configured or discovered URL cannot be used.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A request header name or value is not valid HTTP.
	#[error("Header `{name}` is not a valid HTTP header.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// A request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// The authorization-code grant was selected but no code is configured.
	#[error("Credentials supply neither an access token, a refresh token, nor an authorization code.")]
	MissingAuthorizationCode,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_url(url: impl Display, source: url::ParseError) -> Self {
		Self::InvalidUrl { url: url.to_string(), source }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token acquisition failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The token endpoint rejected the grant.
	#[error("Token endpoint rejected the {grant} grant (HTTP {}): {body}", display_status(.status))]
	Rejected {
		/// Grant that was attempted.
		grant: GrantType,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Raw response body.
		body: String,
	},
	/// The token endpoint answered with a body lacking the expected token fields.
	#[error("Token endpoint returned an unusable {grant} response (HTTP {}): {body}", display_status(.status))]
	MalformedResponse {
		/// Grant that was attempted.
		grant: GrantType,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Raw response body.
		body: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The token endpoint answered in a way the OAuth client could not interpret.
	#[error("Token endpoint returned an unexpected {grant} response (HTTP {}): {message}", display_status(.status))]
	Unexpected {
		/// Grant that was attempted.
		grant: GrantType,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Client-supplied description of the problem.
		message: String,
		/// Raw response body, when one was read.
		body: Option<String>,
	},
}
impl AuthError {
	/// HTTP status returned by the token endpoint, when known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. }
			| Self::MalformedResponse { status, .. }
			| Self::Unexpected { status, .. } => *status,
		}
	}

	/// Raw body returned by the token endpoint, when it was retained.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::Rejected { body, .. } | Self::MalformedResponse { body, .. } => Some(body),
			Self::Unexpected { body, .. } => body.as_deref(),
		}
	}
}

/// Resource call failures raised by the HTTP invoker.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Status code outside `[200, 299]`.
	#[error("{method} {url} returned HTTP {status}{}.", describe_provider_error(.code.as_deref(), .message.as_deref()))]
	Status {
		/// Request method.
		method: Method,
		/// Request URL.
		url: Url,
		/// HTTP status code.
		status: u16,
		/// Provider error code (`code` field), when the body carries one.
		code: Option<String>,
		/// Provider error message (`message` field), when the body carries one.
		message: Option<String>,
		/// Raw response body.
		body: String,
	},
	/// 2xx response whose body is not JSON.
	#[error("{method} {url} returned a body that is not valid JSON (HTTP {status}).")]
	MalformedBody {
		/// Request method.
		method: Method,
		/// Request URL.
		url: Url,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
		/// JSON parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// 2xx JSON response that does not match the expected shape.
	#[error("{method} {url} returned JSON that does not match the expected shape at `{}`.", .source.path())]
	Decode {
		/// Request method.
		method: Method,
		/// Request URL.
		url: Url,
		/// HTTP status code.
		status: u16,
		/// Structured decoding failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ApiError {
	/// HTTP status code of the failing response.
	pub fn status(&self) -> u16 {
		match self {
			Self::Status { status, .. }
			| Self::MalformedBody { status, .. }
			| Self::Decode { status, .. } => *status,
		}
	}

	/// Raw response body, when it was retained.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::Status { body, .. } | Self::MalformedBody { body, .. } => Some(body),
			Self::Decode { .. } => None,
		}
	}
}

/// Expected list elements that were absent from a response.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum NotFoundError {
	/// No active group lets the user send.
	#[error("No group the user can send from.")]
	SendableGroup,
	/// No personal, group, or account library document is visible.
	#[error("No library documents found in group `{group_id}`.")]
	LibraryDocument {
		/// Group that was searched.
		group_id: String,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Short label of the endpoint being called.
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// HTTP client failure without a structured source.
	#[error("HTTP client error occurred while calling {target}: {message}")]
	Other {
		/// Short label of the endpoint being called.
		target: &'static str,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		target: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { target, source: Box::new(src) }
	}
}

fn display_status(status: &Option<u16>) -> String {
	status.map_or_else(|| "status unknown".into(), |code| code.to_string())
}

fn describe_provider_error(code: Option<&str>, message: Option<&str>) -> String {
	match (code, message) {
		(Some(code), Some(message)) => format!(" ({code}: {message})"),
		(Some(code), None) => format!(" ({code})"),
		(None, Some(message)) => format!(" ({message})"),
		(None, None) => String::new(),
	}
}
