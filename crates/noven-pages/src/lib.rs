//! Noven Pages - WASM form guard
//!
//! Client-side validation for the noven registration and verification
//! forms. The guard filters key presses on numeric fields, mirrors form
//! validity onto the submit button as a CSS class token, and cancels
//! submission of invalid forms.
//!
//! ## Architecture
//!
//! - [`dom`]: DOM abstraction ([`DomHost`]) with an in-memory and a `web-sys` adapter
//! - [`event`]: normalized key and form events
//! - [`rules`]: pure validation rules
//! - [`guard`]: [`FormGuard`], which binds the rules to a document
//! - [`config`]: field ids, lengths and class names
//! - [`launcher`]: DOM-ready installation and the `installFormGuard` export
//! - [`logging`]: console / `tracing` logging macros
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use noven_pages::{FormGuard, GuardConfig, MemoryDocument};
//!
//! let doc = Rc::new(MemoryDocument::new());
//! let form = doc.append_form("/verify");
//! let vcode = doc.append_input(&form, "vcode");
//!
//! let guard = Rc::new(FormGuard::new(Rc::clone(&doc), GuardConfig::default()));
//! guard.bind_handlers();
//!
//! doc.type_text(&vcode, "123456");
//! assert!(doc.submit(&form));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod guard;
pub mod launcher;
pub mod logging;
pub mod rules;

pub use config::{FieldIds, FieldRules, GuardConfig};
pub use dom::{DomHost, EventHandler, MemoryDocument, MemoryElement};
#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
pub use error::{ConfigError, DomError};
pub use event::{DomEvent, EventOutcome, EventType, KeyInput};
pub use guard::{Bindings, FormGuard, Validity};
pub use launcher::{install, load_config};
#[cfg(target_arch = "wasm32")]
pub use launcher::install_form_guard;
pub use rules::{FormSnapshot, ValidationMode, check_snapshot, digit_only};

// Paths used by the exported logging macros.
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
