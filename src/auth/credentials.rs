//! Application credentials required by every signed call.

// self
use crate::{
	_prelude::*,
	auth::{ApiSecret, RequestSignature, SigningInput},
	error::ConfigError,
	http::HttpMethod,
};

/// Configuration key holding the application key.
pub const APPLICATION_KEY_VAR: &str = "OVH_APP_KEY";
/// Configuration key holding the application secret.
pub const APPLICATION_SECRET_VAR: &str = "OVH_APP_SECRET";
/// Configuration key holding the consumer key.
pub const CONSUMER_KEY_VAR: &str = "OVH_CONSUMER_KEY";

/// Complete credential triple; construction fails if any part is missing.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	application_key: ApiSecret,
	application_secret: ApiSecret,
	consumer_key: ApiSecret,
}
impl Credentials {
	/// Validates and bundles the three provider secrets.
	pub fn new(
		application_key: impl Into<String>,
		application_secret: impl Into<String>,
		consumer_key: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let application_key = require(APPLICATION_KEY_VAR, Some(application_key.into()))?;
		let application_secret = require(APPLICATION_SECRET_VAR, Some(application_secret.into()))?;
		let consumer_key = require(CONSUMER_KEY_VAR, Some(consumer_key.into()))?;

		Ok(Self { application_key, application_secret, consumer_key })
	}

	/// Reads the credential triple through `lookup`, reporting the first missing key.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		Ok(Self {
			application_key: require(APPLICATION_KEY_VAR, lookup(APPLICATION_KEY_VAR))?,
			application_secret: require(APPLICATION_SECRET_VAR, lookup(APPLICATION_SECRET_VAR))?,
			consumer_key: require(CONSUMER_KEY_VAR, lookup(CONSUMER_KEY_VAR))?,
		})
	}

	/// Application key sent in clear in the application header.
	pub fn application_key(&self) -> &ApiSecret {
		&self.application_key
	}

	/// Consumer key sent in clear in the consumer header.
	pub fn consumer_key(&self) -> &ApiSecret {
		&self.consumer_key
	}

	/// Signs one request with the application secret.
	pub fn sign(&self, method: HttpMethod, url: &str, body: &str, timestamp: i64) -> RequestSignature {
		SigningInput {
			application_secret: self.application_secret.expose(),
			consumer_key: self.consumer_key.expose(),
			method,
			url,
			body,
			timestamp,
		}
		.sign()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("application_key", &self.application_key)
			.field("application_secret", &self.application_secret)
			.field("consumer_key", &self.consumer_key)
			.finish()
	}
}

fn require(name: &'static str, value: Option<String>) -> Result<ApiSecret, ConfigError> {
	let secret = value.map(ApiSecret::new).filter(|secret| !secret.is_blank());

	secret.ok_or(ConfigError::MissingCredential { name })
}
