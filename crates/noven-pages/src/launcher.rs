//! Installing the guard on a page.
//!
//! [`install`] waits for the document to be parsed, then builds a
//! [`FormGuard`] and binds it. In the browser, pages call the exported
//! `installFormGuard` from their bootstrap script:
//!
//! ```text
//! import init, { installFormGuard } from "./noven_pages.js";
//! await init();
//! installFormGuard();                               // template defaults
//! installFormGuard('{ "valid_class": "ready" }');   // overrides
//! ```

use std::rc::Rc;

use crate::config::GuardConfig;
use crate::dom::DomHost;
use crate::error::{ConfigError, DomError};
use crate::guard::FormGuard;
use crate::{error_log, info_log};

/// Resolves the page configuration. `None` selects the template defaults.
///
/// Rejected overrides are reported with `error_log!` before being returned.
pub fn load_config(config_json: Option<&str>) -> Result<GuardConfig, ConfigError> {
	let Some(json) = config_json else {
		return Ok(GuardConfig::default());
	};
	GuardConfig::from_json(json).inspect_err(|e| error_log!("form guard config rejected: {}", e))
}

/// Builds and binds a guard on `host` once the document is ready.
///
/// Handlers keep the guard alive for the lifetime of the document.
pub fn install<H: DomHost + 'static>(host: Rc<H>, config: GuardConfig) -> Result<(), DomError> {
	let ready_host = Rc::clone(&host);
	host.when_ready(Box::new(move || {
		let guard = Rc::new(FormGuard::new(ready_host, config));
		let bindings = guard.bind_handlers();
		info_log!(
			"form guard installed: {} key filter(s), submit gate {}, keyup refresh {}",
			bindings.key_filters,
			bindings.submit,
			bindings.key_up
		);
	}))
	.inspect_err(|e| error_log!("form guard not installed: {}", e))
}

#[cfg(target_arch = "wasm32")]
mod web_entry {
	use std::rc::Rc;

	use wasm_bindgen::prelude::*;

	use crate::dom::WebDocument;
	use crate::error_log;

	/// Installs the form guard on the current page.
	///
	/// `config_json` overrides the template defaults. Fails on invalid JSON
	/// or when no window or document is available.
	#[wasm_bindgen(js_name = installFormGuard)]
	pub fn install_form_guard(config_json: Option<String>) -> Result<(), JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let config = super::load_config(config_json.as_deref())
			.map_err(|e| JsValue::from_str(&e.to_string()))?;
		let host = WebDocument::from_window().map_err(|e| {
			error_log!("form guard not installed: {}", e);
			JsValue::from_str(&e.to_string())
		})?;
		super::install(Rc::new(host), config).map_err(|e| JsValue::from_str(&e.to_string()))
	}
}

#[cfg(target_arch = "wasm32")]
pub use web_entry::install_form_guard;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::MemoryDocument;
	use crate::event::EventType;
	use rstest::rstest;

	#[rstest]
	fn test_load_config_defaults_and_overrides() {
		assert_eq!(load_config(None).unwrap(), GuardConfig::default());
		let config = load_config(Some(r#"{ "valid_class": "ready" }"#)).unwrap();
		assert_eq!(config.valid_class, "ready");
		assert!(matches!(load_config(Some("{")), Err(ConfigError::Parse(_))));
	}

	#[rstest]
	fn test_install_defers_until_loaded() {
		let doc = Rc::new(MemoryDocument::loading());
		let form = doc.append_form("/verify");
		install(Rc::clone(&doc), GuardConfig::default()).unwrap();
		assert_eq!(doc.listener_count(&form, EventType::Submit), 0);

		doc.finish_loading();
		assert_eq!(doc.listener_count(&form, EventType::Submit), 1);
		assert_eq!(doc.listener_count(&form, EventType::KeyUp), 1);
	}

	#[rstest]
	fn test_install_on_parsed_document_binds_immediately() {
		let doc = Rc::new(MemoryDocument::new());
		let form = doc.append_form("/verify");
		doc.append_input(&form, "vcode");
		install(Rc::clone(&doc), GuardConfig::default()).unwrap();
		assert!(!doc.submit(&form));
	}
}
