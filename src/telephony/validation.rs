//! Input rules enforced before any mutation reaches the provider.

// self
use crate::{
	error::ValidationError,
	telephony::{ForwardingKind, MAX_NO_REPLY_TIMER, VOICEMAIL},
};

/// Shortest accepted destination once normalized.
pub const MIN_DESTINATION_LEN: usize = 3;

/// Keeps digits plus a single leading `+`, dropping spaces, dots, dashes, and the like.
pub fn normalize_destination(raw: &str) -> String {
	let mut cleaned = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if ch.is_ascii_digit() || (ch == '+' && cleaned.is_empty()) {
			cleaned.push(ch);
		}
	}

	cleaned
}

/// Validates a destination for `kind` and returns the value to send.
///
/// Busy and no-reply forwarding accept the [`VOICEMAIL`] sentinel verbatim; every other value
/// must normalize to at least [`MIN_DESTINATION_LEN`] characters.
pub fn validate_destination(kind: ForwardingKind, raw: &str) -> Result<String, ValidationError> {
	if kind.accepts_voicemail() && raw.trim().eq_ignore_ascii_case(VOICEMAIL) {
		return Ok(VOICEMAIL.to_owned());
	}

	let cleaned = normalize_destination(raw);

	if cleaned.chars().count() < MIN_DESTINATION_LEN {
		return Err(ValidationError::DestinationTooShort {
			input: raw.to_owned(),
			min: MIN_DESTINATION_LEN,
		});
	}

	Ok(cleaned)
}

/// Validates a requested no-reply delay.
pub fn validate_no_reply_timer(seconds: i64) -> Result<u32, ValidationError> {
	u32::try_from(seconds)
		.ok()
		.filter(|value| *value <= MAX_NO_REPLY_TIMER)
		.ok_or(ValidationError::TimerOutOfRange { seconds, max: MAX_NO_REPLY_TIMER })
}
