//! Browser tests for the `web-sys` document adapter.
//!
//! Run with:
//!   wasm-pack test --chrome --headless crates/noven-pages

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use noven_pages::{DomHost, FormGuard, GuardConfig, WebDocument};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlInputElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> Rc<WebDocument> {
	let host = WebDocument::from_window().unwrap();
	host.document().body().unwrap().set_inner_html(html);
	Rc::new(host)
}

fn set_input(host: &WebDocument, id: &str, value: &str) {
	let input: HtmlInputElement = host.element_by_id(id).unwrap().dyn_into().unwrap();
	input.set_value(value);
}

/// Dispatches a bubbling, cancelable event. Returns false if a handler cancelled it.
fn fire(target: &web_sys::Element, name: &str) -> bool {
	let init = EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = Event::new_with_event_init_dict(name, &init).unwrap();
	target.dispatch_event(&event).unwrap()
}

/// Dispatches a cancelable `keypress` carrying legacy char and key codes.
fn press(target: &web_sys::Element, char_code: u32, key_code: u32) -> bool {
	let init = KeyboardEventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	init.set_char_code(char_code);
	init.set_key_code(key_code);
	let event = KeyboardEvent::new_with_keyboard_event_init_dict("keypress", &init).unwrap();
	target.dispatch_event(&event).unwrap()
}

#[wasm_bindgen_test]
fn test_when_ready_runs_on_parsed_document() {
	let host = WebDocument::from_window().unwrap();
	let ran = Rc::new(Cell::new(false));
	let flag = Rc::clone(&ran);
	host.when_ready(Box::new(move || flag.set(true))).unwrap();
	assert!(ran.get());
}

#[wasm_bindgen_test]
fn test_keypress_filter_prefers_char_code() {
	let host = mount(r#"<form action="/register"><input id="uc"><input id="mc"></form>"#);
	let guard = Rc::new(FormGuard::new(Rc::clone(&host), GuardConfig::default()));
	assert_eq!(guard.bind_handlers().key_filters, 2);

	let uc = host.element_by_id("uc").unwrap();
	assert!(!press(&uc, 97, 55));
	assert!(press(&uc, 55, 97));
	assert!(press(&uc, 0, 55));
	assert!(!press(&uc, 0, 0));
}

#[wasm_bindgen_test]
fn test_lookup_and_classes() {
	let host = mount(r#"<form action="/verify"><input id="vcode"><button class="btn"></button></form>"#);
	let form = host.first_form().unwrap();
	let button = host.first_by_class("btn").unwrap();

	assert!(host.form_action(&form).contains("verify"));
	host.add_class(&button, "btnValid").unwrap();
	host.add_class(&button, "btnValid").unwrap();
	assert_eq!(button.class_name(), "btn btnValid");
	host.remove_class(&button, "btnValid").unwrap();
	host.remove_class(&button, "btnValid").unwrap();
	assert_eq!(button.class_name(), "btn");
}

#[wasm_bindgen_test]
fn test_keyup_and_submit_gate() {
	let host = mount(r#"<form action="/verify"><input id="vcode"><button class="btn"></button></form>"#);
	let guard = Rc::new(FormGuard::new(Rc::clone(&host), GuardConfig::default()));
	let bindings = guard.bind_handlers();
	assert!(bindings.submit && bindings.key_up);

	let form = host.first_form().unwrap();
	let vcode = host.element_by_id("vcode").unwrap();
	let button = host.first_by_class("btn").unwrap();

	set_input(&host, "vcode", "12345");
	fire(&vcode, "keyup");
	assert!(!button.class_list().contains("btnValid"));
	assert!(!fire(&form, "submit"));

	set_input(&host, "vcode", "123456");
	fire(&vcode, "keyup");
	assert!(button.class_list().contains("btnValid"));
}
