//! In-memory document
//!
//! A minimal document tree that implements [`DomHost`] without a browser.
//! Events bubble from the target through its ancestors, and a handler
//! returning [`EventOutcome::PreventDefault`] cancels the default action
//! the way `preventDefault()` does. Key presses that are not cancelled
//! insert their character into the target's value.
//!
//! ```ignore
//! let doc = MemoryDocument::new();
//! let form = doc.append_form("/register");
//! let uc = doc.append_input(&form, "uc");
//! doc.type_text(&uc, "12a3");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{DomHost, EventHandler, ReadyCallback};
use crate::error::DomError;
use crate::event::{DomEvent, EventOutcome, EventType, KeyInput};

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryElement(usize);

#[derive(Default)]
struct Node {
	tag: String,
	id: Option<String>,
	parent: Option<usize>,
	classes: Vec<String>,
	attributes: HashMap<String, String>,
	value: String,
	listeners: Vec<(EventType, EventHandler)>,
}

#[derive(Default)]
struct Inner {
	nodes: Vec<Node>,
	loading: bool,
	ready: Vec<ReadyCallback>,
}

/// In-memory [`DomHost`]. Clones share the same document.
#[derive(Clone, Default)]
pub struct MemoryDocument {
	inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryDocument")
			.field("nodes", &inner.nodes.len())
			.field("loading", &inner.loading)
			.finish()
	}
}

impl MemoryDocument {
	/// Creates an empty, fully parsed document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty document still in the `loading` state.
	///
	/// Ready callbacks are queued until [`finish_loading`](Self::finish_loading).
	pub fn loading() -> Self {
		let doc = Self::default();
		doc.inner.borrow_mut().loading = true;
		doc
	}

	/// Marks the document parsed and runs the queued ready callbacks.
	pub fn finish_loading(&self) {
		let callbacks = {
			let mut inner = self.inner.borrow_mut();
			inner.loading = false;
			std::mem::take(&mut inner.ready)
		};
		for callback in callbacks {
			callback();
		}
	}

	fn push(&self, node: Node) -> MemoryElement {
		let mut inner = self.inner.borrow_mut();
		inner.nodes.push(node);
		MemoryElement(inner.nodes.len() - 1)
	}

	/// Appends a `<form>` with the given action.
	pub fn append_form(&self, action: &str) -> MemoryElement {
		let mut attributes = HashMap::new();
		attributes.insert("action".to_string(), action.to_string());
		self.push(Node {
			tag: "form".to_string(),
			attributes,
			..Default::default()
		})
	}

	/// Appends an `<input id=…>` inside `parent`.
	pub fn append_input(&self, parent: &MemoryElement, id: &str) -> MemoryElement {
		self.push(Node {
			tag: "input".to_string(),
			id: Some(id.to_string()),
			parent: Some(parent.0),
			..Default::default()
		})
	}

	/// Appends a `<button>` with a whitespace-separated `class` attribute.
	pub fn append_button(&self, parent: Option<&MemoryElement>, class: &str) -> MemoryElement {
		self.push(Node {
			tag: "button".to_string(),
			parent: parent.map(|p| p.0),
			classes: class.split_whitespace().map(str::to_string).collect(),
			..Default::default()
		})
	}

	/// Replaces an input's value without dispatching events.
	pub fn set_value(&self, element: &MemoryElement, value: &str) {
		if let Some(node) = self.inner.borrow_mut().nodes.get_mut(element.0) {
			node.value = value.to_string();
		}
	}

	/// Replaces a form's action.
	pub fn set_action(&self, form: &MemoryElement, action: &str) {
		if let Some(node) = self.inner.borrow_mut().nodes.get_mut(form.0) {
			node.attributes.insert("action".to_string(), action.to_string());
		}
	}

	/// Class tokens of an element, in insertion order.
	pub fn class_tokens(&self, element: &MemoryElement) -> Vec<String> {
		self.inner
			.borrow()
			.nodes
			.get(element.0)
			.map(|node| node.classes.clone())
			.unwrap_or_default()
	}

	/// Number of `event` listeners attached directly to `element`.
	pub fn listener_count(&self, element: &MemoryElement, event: EventType) -> usize {
		self.inner
			.borrow()
			.nodes
			.get(element.0)
			.map(|node| node.listeners.iter().filter(|(ty, _)| *ty == event).count())
			.unwrap_or(0)
	}

	/// Dispatches `event` at `target` and bubbles it through the ancestors.
	///
	/// Returns `PreventDefault` if any handler cancelled it.
	pub fn dispatch(&self, target: &MemoryElement, event: DomEvent) -> EventOutcome {
		let event_type = event.event_type();
		// Collect first so handlers can re-enter the document.
		let handlers: Vec<EventHandler> = {
			let inner = self.inner.borrow();
			let mut handlers = Vec::new();
			let mut cursor = Some(target.0);
			while let Some(index) = cursor {
				let Some(node) = inner.nodes.get(index) else {
					break;
				};
				handlers.extend(
					node.listeners
						.iter()
						.filter(|(ty, _)| *ty == event_type)
						.map(|(_, handler)| Rc::clone(handler)),
				);
				cursor = node.parent;
			}
			handlers
		};

		let mut outcome = EventOutcome::Continue;
		for handler in handlers {
			if handler(&event).is_prevented() {
				outcome = EventOutcome::PreventDefault;
			}
		}
		outcome
	}

	/// Simulates one key stroke: `keypress`, insertion unless cancelled, then `keyup`.
	///
	/// Returns true if a character was inserted.
	pub fn press_key(&self, element: &MemoryElement, input: KeyInput) -> bool {
		let mut inserted = false;
		if !self.dispatch(element, DomEvent::KeyPress(input)).is_prevented()
			&& let Some(c) = input.as_char()
		{
			if let Some(node) = self.inner.borrow_mut().nodes.get_mut(element.0) {
				node.value.push(c);
				inserted = true;
			}
		}
		self.dispatch(element, DomEvent::KeyUp);
		inserted
	}

	/// Types each character of `text` with [`press_key`](Self::press_key).
	pub fn type_text(&self, element: &MemoryElement, text: &str) {
		for c in text.chars() {
			self.press_key(element, KeyInput::from_char(c));
		}
	}

	/// Attempts to submit `form`. Returns true if the submit went through.
	pub fn submit(&self, form: &MemoryElement) -> bool {
		!self.dispatch(form, DomEvent::Submit).is_prevented()
	}

	fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<MemoryElement> {
		self.inner
			.borrow()
			.nodes
			.iter()
			.position(predicate)
			.map(MemoryElement)
	}

	fn with_node<T>(&self, element: &MemoryElement, f: impl FnOnce(&Node) -> T) -> Option<T> {
		self.inner.borrow().nodes.get(element.0).map(f)
	}
}

impl DomHost for MemoryDocument {
	type Element = MemoryElement;

	fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
		self.find(|node| node.id.as_deref() == Some(id))
	}

	fn first_form(&self) -> Option<MemoryElement> {
		self.find(|node| node.tag == "form")
	}

	fn first_by_class(&self, class: &str) -> Option<MemoryElement> {
		self.find(|node| node.classes.iter().any(|token| token == class))
	}

	fn value(&self, element: &MemoryElement) -> String {
		self.with_node(element, |node| node.value.clone())
			.unwrap_or_default()
	}

	fn form_action(&self, form: &MemoryElement) -> String {
		self.with_node(form, |node| node.attributes.get("action").cloned())
			.flatten()
			.unwrap_or_default()
	}

	fn has_class(&self, element: &MemoryElement, token: &str) -> bool {
		self.with_node(element, |node| node.classes.iter().any(|t| t == token))
			.unwrap_or(false)
	}

	fn add_class(&self, element: &MemoryElement, token: &str) -> Result<(), DomError> {
		let mut inner = self.inner.borrow_mut();
		let node = inner
			.nodes
			.get_mut(element.0)
			.ok_or_else(|| DomError::ClassList {
				reason: format!("no such element {:?}", element),
			})?;
		if !node.classes.iter().any(|t| t == token) {
			node.classes.push(token.to_string());
		}
		Ok(())
	}

	fn remove_class(&self, element: &MemoryElement, token: &str) -> Result<(), DomError> {
		let mut inner = self.inner.borrow_mut();
		let node = inner
			.nodes
			.get_mut(element.0)
			.ok_or_else(|| DomError::ClassList {
				reason: format!("no such element {:?}", element),
			})?;
		node.classes.retain(|t| t != token);
		Ok(())
	}

	fn listen(
		&self,
		element: &MemoryElement,
		event: EventType,
		handler: EventHandler,
	) -> Result<(), DomError> {
		super::ensure_listenable(event)?;
		let mut inner = self.inner.borrow_mut();
		let node = inner
			.nodes
			.get_mut(element.0)
			.ok_or_else(|| DomError::Listener {
				event: event.to_string(),
				reason: format!("no such element {:?}", element),
			})?;
		node.listeners.push((event, handler));
		Ok(())
	}

	fn when_ready(&self, callback: ReadyCallback) -> Result<(), DomError> {
		let mut inner = self.inner.borrow_mut();
		if inner.loading {
			inner.ready.push(callback);
			return Ok(());
		}
		drop(inner);
		callback();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_lookup_by_id_form_and_class() {
		let doc = MemoryDocument::new();
		let form = doc.append_form("/register");
		let uc = doc.append_input(&form, "uc");
		let button = doc.append_button(Some(&form), "btn primary");

		assert_eq!(doc.element_by_id("uc"), Some(uc));
		assert_eq!(doc.element_by_id("missing"), None);
		assert_eq!(doc.first_form(), Some(form));
		assert_eq!(doc.first_by_class("primary"), Some(button));
		assert_eq!(doc.form_action(&form), "/register");
	}

	#[rstest]
	fn test_add_class_is_set_semantics() {
		let doc = MemoryDocument::new();
		let button = doc.append_button(None, "btn");

		doc.add_class(&button, "btnValid").unwrap();
		doc.add_class(&button, "btnValid").unwrap();
		assert_eq!(doc.class_tokens(&button), vec!["btn", "btnValid"]);

		doc.remove_class(&button, "btnValid").unwrap();
		doc.remove_class(&button, "btnValid").unwrap();
		assert_eq!(doc.class_tokens(&button), vec!["btn"]);
	}

	#[rstest]
	fn test_events_bubble_to_ancestors() {
		let doc = MemoryDocument::new();
		let form = doc.append_form("/register");
		let uc = doc.append_input(&form, "uc");
		let seen = Rc::new(Cell::new(0));

		let counter = Rc::clone(&seen);
		doc.listen(
			&form,
			EventType::KeyUp,
			Rc::new(move |_: &DomEvent| {
				counter.set(counter.get() + 1);
				EventOutcome::Continue
			}),
		)
		.unwrap();

		doc.type_text(&uc, "12");
		assert_eq!(seen.get(), 2);
		assert_eq!(doc.value(&uc), "12");
	}

	#[rstest]
	fn test_prevented_keypress_is_not_inserted() {
		let doc = MemoryDocument::new();
		let form = doc.append_form("/register");
		let uc = doc.append_input(&form, "uc");
		doc.listen(
			&uc,
			EventType::KeyPress,
			Rc::new(|_: &DomEvent| EventOutcome::PreventDefault),
		)
		.unwrap();

		assert!(!doc.press_key(&uc, KeyInput::from_char('1')));
		assert_eq!(doc.value(&uc), "");
	}

	#[rstest]
	fn test_handler_can_reenter_document() {
		let doc = MemoryDocument::new();
		let form = doc.append_form("/register");
		let button = doc.append_button(Some(&form), "btn");
		let inner_doc = doc.clone();
		doc.listen(
			&form,
			EventType::Submit,
			Rc::new(move |_: &DomEvent| {
				inner_doc.add_class(&button, "seen").ok();
				EventOutcome::Continue
			}),
		)
		.unwrap();

		assert!(doc.submit(&form));
		assert!(doc.has_class(&button, "seen"));
	}

	#[rstest]
	fn test_ready_event_cannot_be_listened_to() {
		let doc = MemoryDocument::new();
		let form = doc.append_form("/register");
		let result = doc.listen(
			&form,
			EventType::DomContentLoaded,
			Rc::new(|_: &DomEvent| EventOutcome::Continue),
		);
		assert!(matches!(result, Err(DomError::Listener { .. })));
		assert_eq!(doc.listener_count(&form, EventType::DomContentLoaded), 0);
	}

	#[rstest]
	fn test_ready_callbacks_wait_for_loading() {
		let doc = MemoryDocument::loading();
		let ran = Rc::new(Cell::new(false));
		let flag = Rc::clone(&ran);
		doc.when_ready(Box::new(move || flag.set(true))).unwrap();
		assert!(!ran.get());

		doc.finish_loading();
		assert!(ran.get());
	}

	#[rstest]
	fn test_ready_callback_runs_immediately_when_parsed() {
		let doc = MemoryDocument::new();
		let ran = Rc::new(Cell::new(false));
		let flag = Rc::clone(&ran);
		doc.when_ready(Box::new(move || flag.set(true))).unwrap();
		assert!(ran.get());
	}
}
