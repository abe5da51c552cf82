//! Pure validation rules.
//!
//! All of this is independent of the DOM. The guard reads the form into a
//! [`FormSnapshot`] and hands it here.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{FieldRules, GuardConfig};
use crate::event::KeyInput;

static DIGIT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]$").expect("digit pattern is a valid literal"));

/// Which ruleset applies, selected by the form's action target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
	/// Registration: user code, mobile number and both passwords.
	Registration,
	/// Verification: the SMS code only.
	Verification,
}

impl ValidationMode {
	/// `Verification` if `action` contains `marker`, `Registration` otherwise.
	pub fn from_action(action: &str, marker: &str) -> Self {
		if action.contains(marker) {
			Self::Verification
		} else {
			Self::Registration
		}
	}
}

/// Current form contents. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
	/// Form action target.
	pub action: String,
	/// User code value.
	pub user_code: String,
	/// Mobile number value.
	pub mobile_code: String,
	/// User password value.
	pub user_password: String,
	/// Mobile password value.
	pub mobile_password: String,
	/// Verification code value.
	pub verify_code: String,
}

/// Returns true only if the key resolves to a character in `[0-9]`.
pub fn digit_only(input: &KeyInput) -> bool {
	let Some(c) = input.as_char() else {
		return false;
	};
	let mut buf = [0u8; 4];
	DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Length as the DOM reports it (UTF-16 code units).
pub fn dom_len(value: &str) -> usize {
	value.encode_utf16().count()
}

/// Applies the ruleset selected by the snapshot's action.
pub fn check_snapshot(snapshot: &FormSnapshot, config: &GuardConfig) -> bool {
	match ValidationMode::from_action(&snapshot.action, &config.mode_marker) {
		ValidationMode::Registration => check_registration(snapshot, &config.rules),
		ValidationMode::Verification => dom_len(&snapshot.verify_code) == config.rules.verify_code_len,
	}
}

fn check_registration(snapshot: &FormSnapshot, rules: &FieldRules) -> bool {
	dom_len(&snapshot.user_code) == rules.user_code_len
		&& dom_len(&snapshot.mobile_code) == rules.mobile_code_len
		&& !snapshot.user_password.is_empty()
		&& !snapshot.mobile_password.is_empty()
}
