//! Error types for the form guard.
//!
//! A missing element is not an error. Lookups return `Option` and the guard
//! skips the binding. These types cover the host failing to do what was
//! asked (no window, a listener that could not be attached) and bad
//! configuration.

use thiserror::Error;

/// Failures reported by a [`DomHost`](crate::dom::DomHost) adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// No global `window` object is available.
	#[error("no global window object is available")]
	NoWindow,

	/// The window has no document.
	#[error("window has no document")]
	NoDocument,

	/// Attaching an event listener failed.
	#[error("failed to attach '{event}' listener: {reason}")]
	Listener {
		/// The event name that failed.
		event: String,
		/// Host-reported reason.
		reason: String,
	},

	/// Mutating an element's class list failed.
	#[error("failed to update class list: {reason}")]
	ClassList {
		/// Host-reported reason.
		reason: String,
	},
}

/// Failures while loading a [`GuardConfig`](crate::config::GuardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The JSON payload could not be parsed.
	#[error("invalid form guard config: {0}")]
	Parse(#[from] serde_json::Error),

	/// A field that must be non-empty was empty.
	#[error("form guard config field `{0}` must not be empty")]
	EmptyValue(&'static str),
}
