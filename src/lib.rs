//! # Noven
//!
//! Browser-side support for the noven grade-notification site.
//!
//! The registration page collects a student number, a mobile number and
//! two passwords. The verification page collects the six-digit SMS code.
//! Both are guarded on the client by [`pages::FormGuard`]. Server-side
//! checking is out of scope for this crate.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - The form guard
//! - `console_error_panic_hook` - Readable panics in the browser console
//! - `debug-hooks` - Debug logging of validity transitions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use noven::prelude::*;
//!
//! // In the page bootstrap (WASM)
//! install_form_guard(None)?;
//! ```

#![warn(missing_docs)]

#[cfg(feature = "pages")]
pub mod pages;

/// Commonly used types.
pub mod prelude {
	#[cfg(feature = "pages")]
	pub use crate::pages::{
		DomHost, FormGuard, GuardConfig, KeyInput, MemoryDocument, Validity, ValidationMode,
		install,
	};
	#[cfg(all(feature = "pages", target_arch = "wasm32"))]
	pub use crate::pages::{WebDocument, install_form_guard};
}
