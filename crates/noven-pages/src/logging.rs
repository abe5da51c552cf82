//! Logging abstraction layer for noven-pages
//!
//! These macros log through the browser console on WASM and through `tracing`
//! on native targets. All but `error_log!` are no-ops in release builds, so
//! install failures still reach the console in production.
//!
//! ## Macro Overview
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-hooks` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | Required | None | `console.info` | `tracing::info!` |
//! | `warn_log!` | Required | None | `console.warn` | `tracing::warn!` |
//! | `error_log!` | Not required | None | `console.error` | `tracing::error!` |
//!
//! ## Example
//!
//! ```ignore
//! use noven_pages::{debug_log, warn_log};
//!
//! debug_log!("validity changed to {:?}", validity);
//! warn_log!("element #{} not found, skipping key-press filter", id);
//! ```

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
///
/// Used for validity transitions and other chatty internals.
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!($($arg)*);
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!($($arg)*);
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
///
/// Skipped bindings are reported at this level.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!($($arg)*);
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (active in every build profile)
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message (active in every build profile)
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!($($arg)*);
	}};
}
