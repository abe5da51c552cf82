//! Form guard
//!
//! [`FormGuard`] binds to one form through a [`DomHost`]:
//!
//! - `keypress` on the user-code and mobile-code inputs only lets digits through,
//! - `keyup` anywhere in the form re-checks the form and toggles the valid
//!   class token on the submit button,
//! - `submit` is cancelled unless the form checks valid at that moment.
//!
//! ## Validity
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Invalid
//!     Invalid --> Valid: keyup / submit, check passes
//!     Valid --> Invalid: keyup / submit, check fails
//! ```
//!
//! The button class is only a display cue. Submission is gated by a fresh
//! check, never by the class.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::GuardConfig;
use crate::dom::{self, DomHost};
use crate::event::{DomEvent, EventOutcome, EventType, KeyInput};
use crate::rules::{self, FormSnapshot};
use crate::{debug_log, warn_log};

/// Result of the last validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
	/// The form would be rejected. Initial state.
	#[default]
	Invalid,
	/// The form passes its ruleset.
	Valid,
}

impl Validity {
	/// Maps a check result to a state.
	pub fn from_check(valid: bool) -> Self {
		if valid { Self::Valid } else { Self::Invalid }
	}

	/// Returns true for [`Validity::Valid`].
	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid)
	}
}

/// Which handlers [`FormGuard::bind_handlers`] managed to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bindings {
	/// Number of digit-only key-press filters attached.
	pub key_filters: usize,
	/// Submit gate attached to the form.
	pub submit: bool,
	/// Key-up refresh attached to the form.
	pub key_up: bool,
}

impl Bindings {
	/// Returns true if nothing was bound.
	pub fn is_empty(&self) -> bool {
		self.key_filters == 0 && !self.submit && !self.key_up
	}
}

/// Validation glue for one form.
pub struct FormGuard<H: DomHost> {
	host: Rc<H>,
	config: GuardConfig,
	validity: Cell<Validity>,
}

impl<H: DomHost> std::fmt::Debug for FormGuard<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormGuard")
			.field("config", &self.config)
			.field("validity", &self.validity.get())
			.finish()
	}
}

impl<H: DomHost + 'static> FormGuard<H> {
	/// Creates a guard over `host`. Nothing is bound until [`bind_handlers`](Self::bind_handlers).
	pub fn new(host: Rc<H>, config: GuardConfig) -> Self {
		Self {
			host,
			config,
			validity: Cell::new(Validity::Invalid),
		}
	}

	/// The guard's configuration.
	pub fn config(&self) -> &GuardConfig {
		&self.config
	}

	/// The host document.
	pub fn host(&self) -> &Rc<H> {
		&self.host
	}

	/// State after the last key-up or submit.
	pub fn validity(&self) -> Validity {
		self.validity.get()
	}

	/// Returns true if the key press should be let through.
	pub fn digit_only(&self, input: &KeyInput) -> bool {
		rules::digit_only(input)
	}

	/// Reads the current form contents. Missing elements read as empty.
	pub fn snapshot(&self) -> FormSnapshot {
		let fields = &self.config.fields;
		let value_of = |id: &str| {
			self.host
				.element_by_id(id)
				.map(|element| self.host.value(&element))
				.unwrap_or_default()
		};

		FormSnapshot {
			action: self
				.host
				.first_form()
				.map(|form| self.host.form_action(&form))
				.unwrap_or_default(),
			user_code: value_of(&fields.user_code),
			mobile_code: value_of(&fields.mobile_code),
			user_password: value_of(&fields.user_password),
			mobile_password: value_of(&fields.mobile_password),
			verify_code: value_of(&fields.verify_code),
		}
	}

	/// Checks the form against the ruleset its action selects. No side effects.
	pub fn check_form(&self) -> bool {
		rules::check_snapshot(&self.snapshot(), &self.config)
	}

	fn transition(&self) -> Validity {
		let next = Validity::from_check(self.check_form());
		let previous = self.validity.replace(next);
		if previous != next {
			debug_log!("form validity {:?} -> {:?}", previous, next);
		}
		next
	}

	/// Key-up handler: re-checks and syncs the valid class token on the button.
	pub fn on_key_up(&self) -> Validity {
		let validity = self.transition();
		if let Some(button) = self.host.first_by_class(&self.config.button_class)
			&& let Err(err) = dom::set_class(
				self.host.as_ref(),
				&button,
				&self.config.valid_class,
				validity.is_valid(),
			) {
			warn_log!("could not update submit button class: {}", err);
		}
		validity
	}

	/// Submit handler: cancels the submit unless the form checks valid now.
	pub fn on_submit(&self) -> EventOutcome {
		EventOutcome::allow_if(self.transition().is_valid())
	}

	/// Attaches all handlers. Missing elements and failed bindings are
	/// logged and skipped.
	pub fn bind_handlers(self: &Rc<Self>) -> Bindings {
		let mut bindings = Bindings::default();

		for id in [&self.config.fields.user_code, &self.config.fields.mobile_code] {
			let Some(input) = self.host.element_by_id(id) else {
				warn_log!("#{} not found, skipping digit filter", id);
				continue;
			};
			let guard = Rc::clone(self);
			let filter: dom::EventHandler = Rc::new(move |event: &DomEvent| match event {
				DomEvent::KeyPress(input) => EventOutcome::allow_if(guard.digit_only(input)),
				_ => EventOutcome::Continue,
			});
			match self.host.listen(&input, EventType::KeyPress, filter) {
				Ok(()) => bindings.key_filters += 1,
				Err(err) => warn_log!("digit filter on #{} skipped: {}", id, err),
			}
		}

		let Some(form) = self.host.first_form() else {
			warn_log!("no form found, skipping submit and keyup handlers");
			return bindings;
		};

		let guard = Rc::clone(self);
		let on_submit: dom::EventHandler = Rc::new(move |_: &DomEvent| guard.on_submit());
		match self.host.listen(&form, EventType::Submit, on_submit) {
			Ok(()) => bindings.submit = true,
			Err(err) => warn_log!("submit gate skipped: {}", err),
		}

		let guard = Rc::clone(self);
		let on_key_up: dom::EventHandler = Rc::new(move |_: &DomEvent| {
			guard.on_key_up();
			EventOutcome::Continue
		});
		match self.host.listen(&form, EventType::KeyUp, on_key_up) {
			Ok(()) => bindings.key_up = true,
			Err(err) => warn_log!("keyup refresh skipped: {}", err),
		}

		bindings
	}
}
