//! Discovered telephony lines.

// self
use crate::{
	_prelude::*,
	telephony::{BillingAccount, LineNumber},
};

/// A billable line as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
	/// Billing account owning the line.
	pub service_name: BillingAccount,
	/// Line identifier.
	pub line_number: LineNumber,
	/// Human-readable label.
	pub description: String,
}
impl Line {
	/// Builds a line, falling back to `"Line {number}"` when the description is blank.
	pub fn new(
		service_name: BillingAccount,
		line_number: LineNumber,
		description: Option<String>,
	) -> Self {
		let description = description
			.filter(|text| !text.trim().is_empty())
			.unwrap_or_else(|| format!("Line {line_number}"));

		Self { service_name, line_number, description }
	}
}
