//! Normalized events passed from a DOM host to the guard's handlers.
//!
//! Browsers populate `charCode` and `keyCode` inconsistently on
//! `keypress`. [`KeyInput`] resolves them once at the boundary, with
//! char-code first and key-code second, so the handlers only ever see a
//! single key value.

/// DOM events the guard listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// `keypress`, used for input filtering.
	KeyPress,
	/// `keyup`, used to refresh the validity cue.
	KeyUp,
	/// `submit`, used to gate submission.
	Submit,
	/// `DOMContentLoaded`, used to defer installation. Observed through
	/// `DomHost::when_ready` only.
	DomContentLoaded,
}

impl EventType {
	/// The DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::KeyPress => "keypress",
			Self::KeyUp => "keyup",
			Self::Submit => "submit",
			Self::DomContentLoaded => "DOMContentLoaded",
		}
	}
}

impl std::fmt::Display for EventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A key event reduced to its resolved character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInput {
	key: Option<u32>,
}

impl KeyInput {
	/// Resolves the key value from raw `charCode` / `keyCode` properties.
	///
	/// Zero means "not populated", as in the DOM. If neither is populated
	/// the input carries no key.
	pub fn from_codes(char_code: u32, key_code: u32) -> Self {
		let key = match (char_code, key_code) {
			(0, 0) => None,
			(0, key_code) => Some(key_code),
			(char_code, _) => Some(char_code),
		};
		Self { key }
	}

	/// Input for a typed character.
	pub fn from_char(c: char) -> Self {
		Self {
			key: Some(c as u32),
		}
	}

	/// Input with no key populated.
	pub fn empty() -> Self {
		Self::default()
	}

	/// The resolved code, if any.
	pub fn key(&self) -> Option<u32> {
		self.key
	}

	/// The resolved code as a character. Codes outside the scalar value range yield `None`.
	pub fn as_char(&self) -> Option<char> {
		self.key.and_then(char::from_u32)
	}

	/// Reads a browser event. Non-keyboard events yield [`KeyInput::empty`].
	#[cfg(target_arch = "wasm32")]
	#[allow(deprecated)]
	pub fn from_web(event: &web_sys::Event) -> Self {
		use wasm_bindgen::JsCast;

		match event.dyn_ref::<web_sys::KeyboardEvent>() {
			Some(key_event) => Self::from_codes(key_event.char_code(), key_event.key_code()),
			None => Self::empty(),
		}
	}
}

/// An event as seen by a guard handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
	/// A key press with its resolved key.
	KeyPress(KeyInput),
	/// A key release.
	KeyUp,
	/// A submit attempt.
	Submit,
}

impl DomEvent {
	/// The type this event is dispatched under.
	pub fn event_type(&self) -> EventType {
		match self {
			Self::KeyPress(_) => EventType::KeyPress,
			Self::KeyUp => EventType::KeyUp,
			Self::Submit => EventType::Submit,
		}
	}
}

/// What a handler asks the host to do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
	/// Let the default action run.
	#[default]
	Continue,
	/// Cancel the default action (suppress the character, block the submit).
	PreventDefault,
}

impl EventOutcome {
	/// `Continue` when `allow` is true, `PreventDefault` otherwise.
	pub fn allow_if(allow: bool) -> Self {
		if allow {
			Self::Continue
		} else {
			Self::PreventDefault
		}
	}

	/// Returns true if the default action was cancelled.
	pub fn is_prevented(&self) -> bool {
		matches!(self, Self::PreventDefault)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(55, 0, Some(55))]
	#[case(0, 55, Some(55))]
	#[case(55, 97, Some(55))]
	#[case(0, 0, None)]
	fn test_key_resolution_precedence(
		#[case] char_code: u32,
		#[case] key_code: u32,
		#[case] expected: Option<u32>,
	) {
		assert_eq!(KeyInput::from_codes(char_code, key_code).key(), expected);
	}

	#[rstest]
	fn test_invalid_scalar_has_no_char() {
		assert_eq!(KeyInput::from_codes(0xD800, 0).as_char(), None);
	}

	#[rstest]
	fn test_from_char() {
		assert_eq!(KeyInput::from_char('7').key(), Some(55));
		assert_eq!(KeyInput::from_char('7').as_char(), Some('7'));
	}

	#[rstest]
	fn test_event_type_names() {
		assert_eq!(DomEvent::KeyPress(KeyInput::empty()).event_type().as_str(), "keypress");
		assert_eq!(DomEvent::KeyUp.event_type().as_str(), "keyup");
		assert_eq!(DomEvent::Submit.event_type().to_string(), "submit");
		assert_eq!(EventType::DomContentLoaded.as_str(), "DOMContentLoaded");
	}

	#[rstest]
	fn test_outcome_allow_if() {
		assert_eq!(EventOutcome::allow_if(true), EventOutcome::Continue);
		assert!(EventOutcome::allow_if(false).is_prevented());
	}
}
