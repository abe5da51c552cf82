//! Client-side form guard
//!
//! This module provides access to noven-pages, the WASM form guard used on
//! the registration and verification pages.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use noven::pages::{FormGuard, GuardConfig, MemoryDocument};
//!
//! let doc = Rc::new(MemoryDocument::new());
//! let form = doc.append_form("/register");
//! doc.append_input(&form, "uc");
//!
//! let guard = Rc::new(FormGuard::new(doc, GuardConfig::default()));
//! let bindings = guard.bind_handlers();
//! assert_eq!(bindings.key_filters, 1);
//! ```

// Re-export all noven-pages functionality
pub use noven_pages::*;
