//! DOM abstraction layer
//!
//! [`DomHost`] is the small set of document capabilities the guard needs:
//! element lookup, value reads, class-list mutation, event binding and a
//! DOM-ready hook. Two adapters implement it:
//!
//! - [`memory::MemoryDocument`]: an in-memory document with event
//!   dispatch, used on native targets and in tests.
//! - [`web::WebDocument`]: the browser document through `web-sys`
//!   (WASM only).

use std::rc::Rc;

use crate::error::DomError;
use crate::event::{DomEvent, EventOutcome, EventType};

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDocument, MemoryElement};
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;

/// Handler invoked for a bound event. Its outcome decides whether the
/// host cancels the default action.
pub type EventHandler = Rc<dyn Fn(&DomEvent) -> EventOutcome + 'static>;

/// Callback run once the document has been parsed.
pub type ReadyCallback = Box<dyn FnOnce() + 'static>;

/// Document capabilities used by the form guard.
pub trait DomHost {
	/// Handle to an element of this document.
	type Element: Clone + std::fmt::Debug;

	/// Looks up an element by its `id` attribute.
	fn element_by_id(&self, id: &str) -> Option<Self::Element>;

	/// Returns the first `<form>` in document order.
	fn first_form(&self) -> Option<Self::Element>;

	/// Returns the first element carrying `class`.
	fn first_by_class(&self, class: &str) -> Option<Self::Element>;

	/// Current value of an input. Non-inputs read as empty.
	fn value(&self, element: &Self::Element) -> String;

	/// Action target of a form. Absent actions read as empty.
	fn form_action(&self, form: &Self::Element) -> String;

	/// Returns true if the element's class list contains `token`.
	fn has_class(&self, element: &Self::Element, token: &str) -> bool;

	/// Adds `token` to the class list. Adding a present token is a no-op.
	fn add_class(&self, element: &Self::Element, token: &str) -> Result<(), DomError>;

	/// Removes `token` from the class list. Removing an absent token is a no-op.
	fn remove_class(&self, element: &Self::Element, token: &str) -> Result<(), DomError>;

	/// Attaches `handler` for `event` on `element`.
	fn listen(
		&self,
		element: &Self::Element,
		event: EventType,
		handler: EventHandler,
	) -> Result<(), DomError>;

	/// Runs `callback` once the document is parsed, immediately if it already is.
	fn when_ready(&self, callback: ReadyCallback) -> Result<(), DomError>;
}

/// Readiness goes through [`DomHost::when_ready`], never through `listen`.
pub(crate) fn ensure_listenable(event: EventType) -> Result<(), DomError> {
	if event == EventType::DomContentLoaded {
		return Err(DomError::Listener {
			event: event.to_string(),
			reason: "document readiness is observed with when_ready".to_string(),
		});
	}
	Ok(())
}

/// Adds or removes `token` so that its presence equals `present`.
pub fn set_class<H: DomHost + ?Sized>(
	host: &H,
	element: &H::Element,
	token: &str,
	present: bool,
) -> Result<(), DomError> {
	match (present, host.has_class(element, token)) {
		(true, false) => host.add_class(element, token),
		(false, true) => host.remove_class(element, token),
		_ => Ok(()),
	}
}
