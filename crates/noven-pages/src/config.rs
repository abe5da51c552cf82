//! Form guard configuration.
//!
//! The defaults match the noven registration and verification templates, so
//! most pages install the guard with `GuardConfig::default()`. A page can
//! override any part through a JSON object:
//!
//! ```ignore
//! use noven_pages::config::GuardConfig;
//!
//! let config = GuardConfig::from_json(r#"{ "valid_class": "is-valid" }"#)?;
//! assert_eq!(config.fields.user_code, "uc");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Element ids of the guarded inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldIds {
	/// User code (student number).
	pub user_code: String,
	/// Mobile number.
	pub mobile_code: String,
	/// User password.
	pub user_password: String,
	/// Mobile service password.
	pub mobile_password: String,
	/// Verification code sent by SMS.
	pub verify_code: String,
}

impl Default for FieldIds {
	fn default() -> Self {
		Self {
			user_code: "uc".to_string(),
			mobile_code: "mc".to_string(),
			user_password: "up".to_string(),
			mobile_password: "mp".to_string(),
			verify_code: "vcode".to_string(),
		}
	}
}

/// Exact lengths the guarded fields must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRules {
	/// Required length of the user code.
	pub user_code_len: usize,
	/// Required length of the mobile number.
	pub mobile_code_len: usize,
	/// Required length of the verification code.
	pub verify_code_len: usize,
}

impl Default for FieldRules {
	fn default() -> Self {
		Self {
			user_code_len: 9,
			mobile_code_len: 11,
			verify_code_len: 6,
		}
	}
}

/// Complete configuration of a [`FormGuard`](crate::guard::FormGuard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
	/// Input element ids.
	pub fields: FieldIds,
	/// Length rules.
	pub rules: FieldRules,
	/// Class that marks the submit control.
	pub button_class: String,
	/// Class token toggled on the submit control while the form is valid.
	pub valid_class: String,
	/// Substring of the form action that selects the verification branch.
	pub mode_marker: String,
}

impl Default for GuardConfig {
	fn default() -> Self {
		Self {
			fields: FieldIds::default(),
			rules: FieldRules::default(),
			button_class: "btn".to_string(),
			valid_class: "btnValid".to_string(),
			mode_marker: "verify".to_string(),
		}
	}
}

impl GuardConfig {
	/// Parses a JSON object and validates it. Missing keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects values the guard cannot work with.
	///
	/// An empty class token cannot go into a DOM token list. An empty mode
	/// marker would match every action.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.button_class.trim().is_empty() {
			return Err(ConfigError::EmptyValue("button_class"));
		}
		if self.valid_class.trim().is_empty() {
			return Err(ConfigError::EmptyValue("valid_class"));
		}
		if self.mode_marker.is_empty() {
			return Err(ConfigError::EmptyValue("mode_marker"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_matches_template_ids() {
		let config = GuardConfig::default();
		assert_eq!(config.fields.user_code, "uc");
		assert_eq!(config.fields.mobile_code, "mc");
		assert_eq!(config.fields.user_password, "up");
		assert_eq!(config.fields.mobile_password, "mp");
		assert_eq!(config.fields.verify_code, "vcode");
		assert_eq!(config.button_class, "btn");
		assert_eq!(config.valid_class, "btnValid");
		assert_eq!(config.mode_marker, "verify");
	}

	#[rstest]
	fn test_empty_json_is_default() {
		let config = GuardConfig::from_json("{}").unwrap();
		assert_eq!(config, GuardConfig::default());
	}

	#[rstest]
	fn test_partial_override_keeps_other_defaults() {
		let config =
			GuardConfig::from_json(r#"{ "valid_class": "ok", "rules": { "verify_code_len": 4 } }"#)
				.unwrap();
		assert_eq!(config.valid_class, "ok");
		assert_eq!(config.rules.verify_code_len, 4);
		assert_eq!(config.rules.user_code_len, 9);
		assert_eq!(config.fields, FieldIds::default());
	}

	#[rstest]
	fn test_unknown_key_rejected() {
		let result = GuardConfig::from_json(r#"{ "colour": "red" }"#);
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[rstest]
	#[case(r#"{ "valid_class": "" }"#, "valid_class")]
	#[case(r#"{ "button_class": "  " }"#, "button_class")]
	#[case(r#"{ "mode_marker": "" }"#, "mode_marker")]
	fn test_empty_values_rejected(#[case] json: &str, #[case] field: &str) {
		match GuardConfig::from_json(json) {
			Err(ConfigError::EmptyValue(name)) => assert_eq!(name, field),
			other => panic!("expected EmptyValue({field}), got {other:?}"),
		}
	}
}
