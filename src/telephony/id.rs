//! Identifiers for telephony resources.
//!
//! Billing accounts and line numbers are spliced into request paths as single segments, so they
//! must be non-empty, free of whitespace and path separators, and bounded in length. The acting
//! user only travels inside audit records but obeys the same rules.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Longest accepted identifier, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 128;

macro_rules! resource_id {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Label used in errors and `Debug` output.
			pub const KIND: &'static str = $kind;

			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				match IdentifierIssue::find(&value) {
					None => Ok(Self(value)),
					Some(issue) => Err(IdentifierError { kind: Self::KIND, value, issue }),
				}
			}

			/// Borrows the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl PartialEq<&str> for $name {
			fn eq(&self, other: &&str) -> bool {
				self.0 == *other
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", Self::KIND, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

resource_id! {
	/// Billing account (`serviceName` in provider paths) owning telephony lines.
	BillingAccount => "BillingAccount"
}
resource_id! {
	/// Line within a billing account, usually an international number such as `0033972103630`.
	LineNumber => "LineNumber"
}
resource_id! {
	/// User on whose behalf the synchronizer writes audit records.
	UserId => "UserId"
}

/// An identifier that cannot address a provider resource.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{kind} `{value}` is unusable: {issue}.")]
pub struct IdentifierError {
	/// Identifier type, e.g. `LineNumber`.
	pub kind: &'static str,
	/// Rejected value.
	pub value: String,
	/// Rule the value broke.
	pub issue: IdentifierIssue,
}

/// Rule broken by a rejected identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierIssue {
	/// Nothing to address.
	#[error("it is empty")]
	Empty,
	/// Whitespace anywhere, including non-ASCII spaces.
	#[error("it contains whitespace")]
	Whitespace,
	/// `/` or `\` would split the path segment.
	#[error("it contains a path separator")]
	PathSeparator,
	/// Longer than [`MAX_IDENTIFIER_LEN`].
	#[error("it exceeds {} bytes", MAX_IDENTIFIER_LEN)]
	TooLong,
}
impl IdentifierIssue {
	fn find(value: &str) -> Option<Self> {
		if value.is_empty() {
			Some(Self::Empty)
		} else if value.chars().any(char::is_whitespace) {
			Some(Self::Whitespace)
		} else if value.contains(['/', '\\']) {
			Some(Self::PathSeparator)
		} else if value.len() > MAX_IDENTIFIER_LEN {
			Some(Self::TooLong)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn line_numbers_reject_what_would_break_a_path() {
		let cases = [
			("", IdentifierIssue::Empty),
			("0033 972103630", IdentifierIssue::Whitespace),
			("0033972103630\u{00A0}", IdentifierIssue::Whitespace),
			("0033972103630/options", IdentifierIssue::PathSeparator),
		];

		for (raw, issue) in cases {
			let err = LineNumber::new(raw).expect_err("Malformed line number should be rejected.");

			assert_eq!(err.issue, issue, "Unexpected issue for {raw:?}.");
			assert_eq!(err.kind, "LineNumber");
		}
	}

	#[test]
	fn account_errors_name_the_value() {
		let err = BillingAccount::new("ab12345 ovh").expect_err("Spaced account should fail.");

		assert_eq!(
			err.to_string(),
			"BillingAccount `ab12345 ovh` is unusable: it contains whitespace."
		);
		assert!(matches!(
			UserId::new("u".repeat(MAX_IDENTIFIER_LEN + 1)),
			Err(IdentifierError { issue: IdentifierIssue::TooLong, .. })
		));
	}

	#[test]
	fn accounts_decode_from_provider_json() {
		let accounts: Vec<BillingAccount> = serde_json::from_str(r#"["ab12345-ovh-1","ba-2"]"#)
			.expect("Account listing should decode.");

		assert_eq!(accounts[0], "ab12345-ovh-1");
		assert_eq!(format!("{:?}", accounts[1]), "BillingAccount(ba-2)");
		assert!(serde_json::from_str::<Vec<BillingAccount>>(r#"["ba-1","ba/2"]"#).is_err());
	}

	#[test]
	fn line_numbers_compare_with_raw_strings() {
		let line: LineNumber = "0033972103630".parse().expect("Line fixture should be valid.");

		assert!(line == "0033972103630");
		assert_eq!(line.as_str(), "0033972103630");
		assert_eq!(String::from(line), "0033972103630");
	}
}
