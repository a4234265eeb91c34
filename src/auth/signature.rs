//! Provider request signatures.
//!
//! Every call carries four headers: the application key, the consumer key, the Unix timestamp
//! used while signing, and `"$1$" + hex(sha1(secret+consumer+METHOD+url+body+timestamp))`. The
//! URL must be the exact absolute URL sent on the wire (query string included) and the body the
//! exact bytes sent (empty for bodyless requests), otherwise the provider rejects the call.

// crates.io
use sha1::{Digest, Sha1};
// self
use crate::{_prelude::*, http::HttpMethod};

/// Header carrying the application key.
pub const APPLICATION_HEADER: &str = "X-Ovh-Application";
/// Header carrying the consumer key.
pub const CONSUMER_HEADER: &str = "X-Ovh-Consumer";
/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "X-Ovh-Timestamp";
/// Header carrying the computed signature.
pub const SIGNATURE_HEADER: &str = "X-Ovh-Signature";
/// Version prefix of every signature value.
pub const SIGNATURE_PREFIX: &str = "$1$";

/// Inputs hashed into a request signature.
#[derive(Clone, Copy)]
pub struct SigningInput<'a> {
	/// Application secret.
	pub application_secret: &'a str,
	/// Consumer key bound to the end user.
	pub consumer_key: &'a str,
	/// HTTP method of the request.
	pub method: HttpMethod,
	/// Absolute request URL, query string included.
	pub url: &'a str,
	/// Exact request body, empty when none is sent.
	pub body: &'a str,
	/// Unix timestamp in whole seconds.
	pub timestamp: i64,
}
impl SigningInput<'_> {
	/// Builds the `+`-joined string the provider expects to be hashed.
	pub fn string_to_sign(&self) -> String {
		format!(
			"{}+{}+{}+{}+{}+{}",
			self.application_secret,
			self.consumer_key,
			self.method,
			self.url,
			self.body,
			self.timestamp
		)
	}

	/// Computes the signature value (`$1$` followed by the lowercase-hex SHA-1 digest).
	pub fn sign(&self) -> RequestSignature {
		let digest = Sha1::digest(self.string_to_sign().as_bytes());

		RequestSignature {
			timestamp: self.timestamp,
			signature: format!("{SIGNATURE_PREFIX}{digest:x}"),
		}
	}
}
impl Debug for SigningInput<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SigningInput")
			.field("method", &self.method)
			.field("url", &self.url)
			.field("body_len", &self.body.len())
			.field("timestamp", &self.timestamp)
			.finish_non_exhaustive()
	}
}

/// Timestamp + signature pair attached to one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSignature {
	/// Unix timestamp the signature was computed for.
	pub timestamp: i64,
	/// Header value, `$1$` prefixed.
	pub signature: String,
}
