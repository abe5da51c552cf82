//! Browser document adapter (WASM only)

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

use super::{DomHost, EventHandler, ReadyCallback};
use crate::error::DomError;
use crate::event::{DomEvent, EventType, KeyInput};

/// [`DomHost`] backed by a `web_sys::Document`.
///
/// Listener closures are owned by this value and live as long as it does.
pub struct WebDocument {
	document: Document,
	listeners: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>>,
}

impl std::fmt::Debug for WebDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WebDocument")
			.field("listeners", &self.listeners.borrow().len())
			.finish()
	}
}

impl WebDocument {
	/// Wraps an existing document.
	pub fn new(document: Document) -> Self {
		Self {
			document,
			listeners: RefCell::new(Vec::new()),
		}
	}

	/// Wraps the global window's document.
	pub fn from_window() -> Result<Self, DomError> {
		let window = web_sys::window().ok_or(DomError::NoWindow)?;
		let document = window.document().ok_or(DomError::NoDocument)?;
		Ok(Self::new(document))
	}

	/// The wrapped document.
	pub fn document(&self) -> &Document {
		&self.document
	}
}

fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl DomHost for WebDocument {
	type Element = Element;

	fn element_by_id(&self, id: &str) -> Option<Element> {
		self.document.get_element_by_id(id)
	}

	fn first_form(&self) -> Option<Element> {
		self.document.get_elements_by_tag_name("form").item(0)
	}

	fn first_by_class(&self, class: &str) -> Option<Element> {
		self.document.get_elements_by_class_name(class).item(0)
	}

	fn value(&self, element: &Element) -> String {
		match element.dyn_ref::<HtmlInputElement>() {
			Some(input) => input.value(),
			None => element.get_attribute("value").unwrap_or_default(),
		}
	}

	fn form_action(&self, form: &Element) -> String {
		match form.dyn_ref::<HtmlFormElement>() {
			Some(form) => form.action(),
			None => form.get_attribute("action").unwrap_or_default(),
		}
	}

	fn has_class(&self, element: &Element, token: &str) -> bool {
		element.class_list().contains(token)
	}

	fn add_class(&self, element: &Element, token: &str) -> Result<(), DomError> {
		element
			.class_list()
			.add_1(token)
			.map_err(|e| DomError::ClassList {
				reason: describe(&e),
			})
	}

	fn remove_class(&self, element: &Element, token: &str) -> Result<(), DomError> {
		element
			.class_list()
			.remove_1(token)
			.map_err(|e| DomError::ClassList {
				reason: describe(&e),
			})
	}

	fn listen(
		&self,
		element: &Element,
		event: EventType,
		handler: EventHandler,
	) -> Result<(), DomError> {
		super::ensure_listenable(event)?;
		let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
			let dom_event = match event {
				EventType::KeyPress => DomEvent::KeyPress(KeyInput::from_web(&raw)),
				EventType::KeyUp => DomEvent::KeyUp,
				EventType::Submit => DomEvent::Submit,
				EventType::DomContentLoaded => return,
			};
			if handler(&dom_event).is_prevented() {
				raw.prevent_default();
			}
		});

		element
			.add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
			.map_err(|e| DomError::Listener {
				event: event.to_string(),
				reason: describe(&e),
			})?;

		self.listeners.borrow_mut().push(closure);
		Ok(())
	}

	fn when_ready(&self, callback: ReadyCallback) -> Result<(), DomError> {
		if self.document.ready_state() != "loading" {
			callback();
			return Ok(());
		}

		// once_into_js frees the closure after its single call
		let listener = Closure::once_into_js(move || callback());
		self.document
			.add_event_listener_with_callback(
				EventType::DomContentLoaded.as_str(),
				listener.unchecked_ref(),
			)
			.map_err(|e| DomError::Listener {
				event: EventType::DomContentLoaded.to_string(),
				reason: describe(&e),
			})
	}
}
