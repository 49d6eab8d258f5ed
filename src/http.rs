//! Transport primitives for token exchanges and resource calls.
//!
//! Token exchanges go through [`TokenHttpClient`], the seam the `oauth2` crate drives. Each
//! exchange hands the transport a fresh [`ResponseMetadataSlot`]; implementations call
//! [`ResponseMetadataSlot::take`] before dispatching and [`ResponseMetadataSlot::store`] once a
//! status is known, so token errors report the status even when `oauth2` swallows it.
//!
//! Resource calls go through [`ReqwestHttpClient::invoke`], see [`request`].

pub mod request;

pub use request::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use reqwest::redirect::Policy;
// self
use crate::{_prelude::*, error::ConfigError};

/// Abstraction over HTTP transports capable of executing OAuth token exchanges while
/// publishing response metadata to the token manager.
///
/// The trait is the token manager's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static`, and the handles they return must own whatever state they need so
/// their request futures stay `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Captures metadata from the most recent token endpoint response.
#[derive(Clone, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint, if available.
	pub status: Option<u16>,
	/// Raw response body, if one was read. May hold token secrets.
	pub body: Option<Vec<u8>>,
}
impl ResponseMetadata {
	/// Response body decoded lossily as UTF-8.
	pub fn body_text(&self) -> Option<String> {
		self.body.as_deref().map(|bytes| String::from_utf8_lossy(bytes).into_owned())
	}
}
impl Debug for ResponseMetadata {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResponseMetadata")
			.field("status", &self.status)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] shared by token exchanges and resource calls.
///
/// Redirects are never followed: a 3xx answer is returned to the caller as a failure, and token
/// forms carrying the client secret are never re-posted elsewhere.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a reqwest client with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`], which should not follow redirects.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	pub(crate) fn instrumented(&self, slot: ResponseMetadataSlot) -> InstrumentedHandle {
		InstrumentedHandle::new(self.0.clone(), slot)
	}
}
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		self.instrumented(slot)
	}
}

struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
impl InstrumentedHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, slot }))
	}
}
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()), body: None });

			let body = response.bytes().await.map_err(Box::new)?.to_vec();

			client
				.slot
				.store(ResponseMetadata { status: Some(status.as_u16()), body: Some(body.clone()) });

			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
