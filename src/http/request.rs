//! Single-shot resource calls: one request in, one JSON value (or error) out.
//!
//! There is no retry and no timeout beyond the transport default.

// crates.io
use reqwest::{
	StatusCode,
	header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
	multipart::Form,
};
// self
use crate::{
	_prelude::*,
	error::{ApiError, ConfigError, TransportError},
	http::ReqwestHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const TARGET: &str = "the resource endpoint";

/// Request body accepted by [`ReqwestHttpClient::invoke`].
pub enum ApiBody {
	/// Serialized as JSON with `Content-Type: application/json`.
	Json(Value),
	/// Sent as `multipart/form-data`; reqwest supplies the boundary header.
	Multipart(Form),
}
impl Debug for ApiBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
			Self::Multipart(_) => f.write_str("Multipart(..)"),
		}
	}
}

/// One resource call: URL, method, headers, and an optional body.
pub struct ApiRequest {
	/// Stage label used for spans.
	pub stage: &'static str,
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Headers attached verbatim, in insertion order. Body-less requests default
	/// `Content-Type` to `application/json`.
	pub headers: Vec<(String, String)>,
	/// Optional request body.
	pub body: Option<ApiBody>,
}
impl ApiRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: Url) -> Self {
		Self { stage: "invoke", method, url, headers: Vec::new(), body: None }
	}

	/// Shorthand for a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Shorthand for a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Labels the request for spans.
	pub fn stage(mut self, stage: &'static str) -> Self {
		self.stage = stage;

		self
	}

	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Appends an `Authorization` header carrying `bearer` (for example `Bearer 3AAA...`).
	pub fn authorization(self, bearer: impl Into<String>) -> Self {
		self.header("Authorization", bearer)
	}

	/// Sets a JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.body = Some(ApiBody::Json(body));

		self
	}

	/// Sets a multipart body.
	pub fn multipart(mut self, form: Form) -> Self {
		self.body = Some(ApiBody::Multipart(form));

		self
	}

	fn header_map(&self) -> Result<HeaderMap, ConfigError> {
		let mut map = HeaderMap::with_capacity(self.headers.len());

		for (name, value) in &self.headers {
			let header_name = HeaderName::from_bytes(name.as_bytes())
				.map_err(|_| ConfigError::InvalidHeader { name: name.clone() })?;
			let header_value = HeaderValue::from_str(value)
				.map_err(|_| ConfigError::InvalidHeader { name: name.clone() })?;

			map.append(header_name, header_value);
		}

		// Body-less calls still announce JSON; bodies bring their own content type.
		if self.body.is_none() && !map.contains_key(CONTENT_TYPE) {
			map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}

		Ok(map)
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let header_names = self.headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();

		f.debug_struct("ApiRequest")
			.field("stage", &self.stage)
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &header_names)
			.field("body", &self.body)
			.finish()
	}
}

/// Successful response already parsed as JSON.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// Request method.
	pub method: Method,
	/// Request URL.
	pub url: Url,
	/// HTTP status code (always within `[200, 299]`).
	pub status: u16,
	/// Parsed body.
	pub body: Value,
}
impl ApiResponse {
	/// Decodes the body into `T`, reporting the JSON path of any mismatch.
	pub fn decode<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let ApiResponse { method, url, status, body } = self;

		serde_path_to_error::deserialize(body)
			.map_err(|source| ApiError::Decode { method, url, status, source }.into())
	}
}

#[derive(Deserialize)]
struct ProviderErrorBody {
	code: Option<String>,
	message: Option<String>,
}

impl ReqwestHttpClient {
	/// Issues `request` once and returns the parsed JSON body.
	///
	/// Any status outside `[200, 299]` fails with [`ApiError::Status`]; a 2xx body that is not
	/// JSON fails with [`ApiError::MalformedBody`].
	pub async fn invoke(&self, request: ApiRequest) -> Result<Value> {
		self.invoke_response(request).await.map(|response| response.body)
	}

	/// Issues `request` once and decodes the JSON body into `T`.
	pub async fn invoke_as<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.invoke_response(request).await?.decode()
	}

	/// Issues `request` once and returns the parsed response with its status.
	pub async fn invoke_response(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Api;

		let span = CallSpan::new(KIND, request.stage);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(request)).await;

		obs::record_result(KIND, &result);

		result
	}

	async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
		let headers = request.header_map()?;
		let ApiRequest { method, url, body, .. } = request;
		let mut builder = self.0.request(method.clone(), url.clone()).headers(headers);

		builder = match body {
			Some(ApiBody::Json(value)) => builder.json(&value),
			Some(ApiBody::Multipart(form)) => builder.multipart(form),
			None => builder,
		};

		obs::debug_event(&format!("{method} {url}"));

		let response = builder.send().await.map_err(map_send_error)?;
		let status = response.status();
		let bytes =
			response.bytes().await.map_err(|source| TransportError::network(TARGET, source))?;

		into_api_response(method, url, status, &bytes)
	}
}

fn into_api_response(
	method: Method,
	url: Url,
	status: StatusCode,
	bytes: &[u8],
) -> Result<ApiResponse> {
	let code = status.as_u16();

	if !(200..=299).contains(&code) {
		let (provider_code, message) = serde_json::from_slice::<ProviderErrorBody>(bytes)
			.map(|parsed| (parsed.code, parsed.message))
			.unwrap_or_default();

		return Err(ApiError::Status {
			method,
			url,
			status: code,
			code: provider_code,
			message,
			body: String::from_utf8_lossy(bytes).into_owned(),
		}
		.into());
	}

	match serde_json::from_slice::<Value>(bytes) {
		Ok(body) => Ok(ApiResponse { method, url, status: code, body }),
		Err(source) => Err(ApiError::MalformedBody {
			method,
			url,
			status: code,
			body: String::from_utf8_lossy(bytes).into_owned(),
			source,
		}
		.into()),
	}
}

fn map_send_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::network(TARGET, err).into()
}
