//! Client configuration: credentials plus the regional API endpoint.
//!
//! Values are injected into [`ApiClient`](crate::client::ApiClient) at construction time;
//! nothing below the config layer reads the process environment.

// self
use crate::{
	_prelude::*,
	auth::{
		APPLICATION_KEY_VAR, APPLICATION_SECRET_VAR, CONSUMER_KEY_VAR, Credentials,
	},
	error::ConfigError,
};

/// Configuration key that overrides the API endpoint.
pub const ENDPOINT_VAR: &str = "OVH_ENDPOINT";
/// Default regional endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://eu.api.ovh.com/1.0";

/// Validated base URL every resource path is appended to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoint(Url);
impl ApiEndpoint {
	/// Validates `url` as a request base.
	pub fn new(url: Url) -> Result<Self, ConfigError> {
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::InvalidEndpoint {
				url: url.to_string(),
				reason: "scheme must be http or https",
			});
		}
		if url.cannot_be_a_base() {
			return Err(ConfigError::InvalidEndpoint {
				url: url.to_string(),
				reason: "URL cannot carry path segments",
			});
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(ConfigError::InvalidEndpoint {
				url: url.to_string(),
				reason: "query strings and fragments are not allowed",
			});
		}

		Ok(Self(url))
	}

	/// Parses and validates a textual endpoint.
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidEndpoint {
			url: raw.to_owned(),
			reason: "not an absolute URL",
		})?;

		Self::new(url)
	}

	/// Base URL.
	pub fn url(&self) -> &Url {
		&self.0
	}

	/// Appends percent-encoded path segments to the base.
	pub fn resource<'s, I>(&self, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = &'s str>,
	{
		let mut url = self.0.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::InvalidEndpoint {
				url: self.0.to_string(),
				reason: "URL cannot carry path segments",
			})?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}
}
impl Default for ApiEndpoint {
	fn default() -> Self {
		Self::parse(DEFAULT_ENDPOINT).expect("Default endpoint must be a valid base URL.")
	}
}
impl Display for ApiEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.0.as_str())
	}
}

/// Everything the API client needs to sign and address requests.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Provider credentials.
	pub credentials: Credentials,
	/// Base endpoint.
	pub endpoint: ApiEndpoint,
}
impl ClientConfig {
	/// Creates a builder with the default endpoint.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads the configuration from process environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration through an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let endpoint = match lookup(ENDPOINT_VAR).filter(|value| !value.trim().is_empty()) {
			Some(raw) => ApiEndpoint::parse(&raw)?,
			None => ApiEndpoint::default(),
		};
		let credentials = Credentials::from_lookup(lookup)?;

		Ok(Self { credentials, endpoint })
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Default)]
pub struct ClientConfigBuilder {
	application_key: Option<String>,
	application_secret: Option<String>,
	consumer_key: Option<String>,
	endpoint: Option<ApiEndpoint>,
}
impl ClientConfigBuilder {
	/// Sets the application key.
	pub fn application_key(mut self, value: impl Into<String>) -> Self {
		self.application_key = Some(value.into());

		self
	}

	/// Sets the application secret.
	pub fn application_secret(mut self, value: impl Into<String>) -> Self {
		self.application_secret = Some(value.into());

		self
	}

	/// Sets the consumer key.
	pub fn consumer_key(mut self, value: impl Into<String>) -> Self {
		self.consumer_key = Some(value.into());

		self
	}

	/// Overrides the endpoint.
	pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
		self.endpoint = Some(endpoint);

		self
	}

	/// Consumes the builder, failing on the first missing credential.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let Self { application_key, application_secret, consumer_key, endpoint } = self;
		let credentials = Credentials::from_lookup(|key| match key {
			APPLICATION_KEY_VAR => application_key.clone(),
			APPLICATION_SECRET_VAR => application_secret.clone(),
			CONSUMER_KEY_VAR => consumer_key.clone(),
			_ => None,
		})?;

		Ok(ClientConfig { credentials, endpoint: endpoint.unwrap_or_default() })
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("application_key_set", &self.application_key.is_some())
			.field("application_secret_set", &self.application_secret.is_some())
			.field("consumer_key_set", &self.consumer_key.is_some())
			.field("endpoint", &self.endpoint)
			.finish()
	}
}
