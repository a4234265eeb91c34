//! Signed API client for the provider's telephony REST surface.
//!
//! [`ApiClient`] turns the crate's operations into signed HTTP calls and decodes the answers
//! into the [`telephony`](crate::telephony) model. It never retries and never swallows errors:
//! retry policy belongs to the caller. Line discovery lives in `lines`, option reads and writes
//! in `options`, and every provider field name is confined to `wire`.

mod lines;
mod options;
mod wire;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{APPLICATION_HEADER, CONSUMER_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER},
	config::ClientConfig,
	error::{ProtocolError, TransportError},
	http::{ApiHttpClient, ApiRequest, ApiResponse, HttpMethod},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Signs, sends, and decodes provider calls.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	config: Arc<ClientConfig>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: Arc::new(config) }
	}

	/// Configuration the client signs and addresses requests with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Issues a signed `GET` and decodes the JSON body as `T`.
	pub(crate) async fn get_json<T>(&self, segments: &[&str]) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(HttpMethod::Get, segments, None).await?;

		decode_body(&response)
	}

	/// Issues a signed `PUT` with a JSON body, ignoring the response payload.
	pub(crate) async fn put_json(&self, segments: &[&str], body: serde_json::Value) -> Result<()> {
		self.send(HttpMethod::Put, segments, Some(body.to_string())).await.map(drop)
	}

	async fn send(
		&self,
		method: HttpMethod,
		segments: &[&str],
		body: Option<String>,
	) -> Result<ApiResponse> {
		let request = self.sign_request(method, segments, body)?;
		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(TransportError::network)?;

		if response.is_success() {
			Ok(response)
		} else {
			Err(decode_failure(&response).into())
		}
	}

	/// Builds the absolute URL for `segments` and attaches the four signed headers.
	pub(crate) fn sign_request(
		&self,
		method: HttpMethod,
		segments: &[&str],
		body: Option<String>,
	) -> Result<ApiRequest> {
		let url = self.config.endpoint.resource(segments.iter().copied())?;
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();
		let credentials = &self.config.credentials;
		let signed =
			credentials.sign(method, url.as_str(), body.as_deref().unwrap_or_default(), timestamp);
		let mut headers = vec![
			(APPLICATION_HEADER, credentials.application_key().expose().to_owned()),
			(CONSUMER_HEADER, credentials.consumer_key().expose().to_owned()),
			(TIMESTAMP_HEADER, signed.timestamp.to_string()),
			(SIGNATURE_HEADER, signed.signature),
		];

		if body.is_some() {
			headers.push(("Content-Type", "application/json".to_owned()));
		}

		Ok(ApiRequest { method, url, headers, body })
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("endpoint", &self.config.endpoint.url().as_str()).finish()
	}
}

fn decode_body<T>(response: &ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProtocolError::Decode { source, status: response.status }.into())
}

fn decode_failure(response: &ApiResponse) -> ProtocolError {
	match serde_json::from_slice::<wire::ProviderErrorBody>(&response.body) {
		Ok(wire::ProviderErrorBody { message: Some(message), error_code, .. })
			if !message.trim().is_empty() =>
			ProtocolError::Provider { status: response.status, message, error_code },
		_ => ProtocolError::Http { status: response.status },
	}
}
