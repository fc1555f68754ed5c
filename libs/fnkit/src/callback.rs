//! Synchronous callback invocation.
//!
//! The callee builds a value and hands it to a caller-supplied function
//! before returning. Nothing is deferred or run on another thread.

use tracing::debug;

/// Payload delivered for `id`.
#[must_use]
pub fn format_payload(id: i64) -> String {
    format!("Data for ID {id}")
}

/// Builds the payload for `id` and invokes `callback` with it exactly once.
///
/// Returns whatever `callback` returns, so a callback producing a `Result`
/// propagates its error straight to the caller.
pub fn fetch_with_callback<F, R>(id: i64, callback: F) -> R
where
    F: FnOnce(String) -> R,
{
    let data = format_payload(id);
    debug!(id, "delivering payload to callback");
    callback(data)
}
