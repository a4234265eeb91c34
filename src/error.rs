//! Crate-level error types shared by the API client and the forwarding synchronizer.

// self
use crate::{_prelude::*, telephony::IdentifierError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; requires operator action and must not be retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// No response was received from the provider.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The provider answered, but with a failure or an unexpected payload.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Input was rejected locally before any request was sent.
	#[error(transparent)]
	Validation(#[from] ValidationError),
}
impl Error {
	/// Returns `true` when re-invoking the same operation may succeed.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Transport(_) | Self::Protocol(_))
	}

	/// HTTP status returned by the provider, when one was received.
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::Protocol(e) => e.status(),
			_ => None,
		}
	}
}

/// Configuration failures detected before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential is absent or blank.
	#[error("Credential `{name}` is missing.")]
	MissingCredential {
		/// Name of the configuration key (never its value).
		name: &'static str,
	},
	/// The API endpoint cannot be used as a request base.
	#[error("API endpoint `{url}` is invalid: {reason}.")]
	InvalidEndpoint {
		/// Offending URL as supplied.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, DNS, TLS, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the telephony API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the telephony API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// The provider responded, but not with what the client expected.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// Non-2xx response carrying a decodable provider message.
	#[error("Provider rejected the request with HTTP {status}: {message}.")]
	Provider {
		/// HTTP status code of the response.
		status: u16,
		/// Provider-supplied message.
		message: String,
		/// Provider-supplied error code, when present.
		error_code: Option<String>,
	},
	/// Non-2xx response without a decodable body.
	#[error("Provider responded with HTTP {status}.")]
	Http {
		/// HTTP status code of the response.
		status: u16,
	},
	/// Successful response whose body does not match the expected shape.
	#[error("Provider returned a malformed payload.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Provider returned an identifier the data model cannot hold.
	#[error("Provider returned an unusable identifier.")]
	InvalidIdentifier(#[from] IdentifierError),
}
impl ProtocolError {
	/// HTTP status of the failing response, when known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Provider { status, .. } | Self::Http { status } | Self::Decode { status, .. } =>
				Some(*status),
			Self::InvalidIdentifier(_) => None,
		}
	}
}

/// Input rejected before any client call is made.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Destination has fewer than three significant characters once normalized.
	#[error("Destination `{input}` must contain at least {min} digits.")]
	DestinationTooShort {
		/// Destination as entered by the user.
		input: String,
		/// Minimum normalized length.
		min: usize,
	},
	/// No-reply timer outside the accepted range.
	#[error("No-reply timer must be between 0 and {max} seconds, got {seconds}.")]
	TimerOutOfRange {
		/// Requested delay.
		seconds: i64,
		/// Largest accepted delay.
		max: u32,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_credential_names_key_only() {
		let err: Error = ConfigError::MissingCredential { name: "OVH_APP_SECRET" }.into();

		assert_eq!(err.to_string(), "Credential `OVH_APP_SECRET` is missing.");
		assert!(!err.is_retryable());
	}

	#[test]
	fn protocol_errors_expose_status() {
		let provider: Error = ProtocolError::Provider {
			status: 403,
			message: "This call has not been granted".into(),
			error_code: None,
		}
		.into();

		assert_eq!(provider.http_status(), Some(403));
		assert!(provider.is_retryable());
		assert!(provider.to_string().contains("This call has not been granted"));

		let bare: Error = ProtocolError::Http { status: 502 }.into();

		assert_eq!(bare.to_string(), "Provider responded with HTTP 502.");
	}
}
