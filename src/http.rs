//! Transport primitives for signed telephony API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside [`ApiRequest`] and [`ApiResponse`] so
//! downstream crates can plug in custom HTTP stacks (or fakes in tests) without touching
//! signing, URL building, or error decoding. Implementations only move bytes: they must not
//! retry, follow redirects on their own initiative, or interpret status codes.

// self
use crate::_prelude::*;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// HTTP methods used by the provider surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// Reads.
	Get,
	/// Writes.
	Put,
}
impl HttpMethod {
	/// Returns the uppercase method token used on the wire and in signatures.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Put => "PUT",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully prepared request: signed headers are already attached.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute URL; must be sent byte-for-byte as signed.
	pub url: Url,
	/// Header name/value pairs.
	pub headers: Vec<(&'static str, String)>,
	/// Exact request body, if any.
	pub body: Option<String>,
}
impl ApiRequest {
	/// Returns the first header value registered under `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Raw response handed back to the client for decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing signed provider requests.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared behind an `Arc` by the API client and
/// the synchronizer, and the returned futures must be `Send`.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the raw response, whatever its status.
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Put => reqwest::Method::PUT,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn method_tokens_are_uppercase() {
		assert_eq!(HttpMethod::Get.to_string(), "GET");
		assert_eq!(HttpMethod::Put.as_str(), "PUT");
	}

	#[test]
	fn request_header_lookup_ignores_case() {
		let request = ApiRequest {
			method: HttpMethod::Get,
			url: Url::parse("https://eu.api.ovh.com/1.0/telephony")
				.expect("Fixture URL should parse."),
			headers: vec![("X-Ovh-Timestamp", "1700000000".into())],
			body: None,
		};

		assert_eq!(request.header("x-ovh-timestamp"), Some("1700000000"));
		assert_eq!(request.header("X-Ovh-Signature"), None);
	}

	#[test]
	fn success_covers_2xx_only() {
		assert!(ApiResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 302, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 404, body: Vec::new() }.is_success());
	}
}
