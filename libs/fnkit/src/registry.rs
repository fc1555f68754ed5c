//! Name-addressed registry of binary integer operations.
//!
//! Design goals:
//! - Operations are plain values: named functions, closures from a factory,
//!   or inline closures all register the same way.
//! - Lookup is by string name; a missing name is an error, never a default.
//! - Registered operations can be fetched and passed on to a higher-order
//!   applier, not only dispatched in place.
//!
//! Implementation details:
//! - Key = operation name, value = `Arc<dyn BinaryOperation>`.
//! - Backed by an `IndexMap` so enumeration follows first registration.
//! - Interior `RwLock` so the registry can be shared by reference.
//!
//! Notes:
//! - Re-registering a name overwrites the previous operation (last write
//!   wins) and keeps the name's original position. `Arc`s already handed out
//!   by [`OperationRegistry::get`] remain valid.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::higher_order;

/// A binary integer operation.
///
/// Implemented for every `Fn(i64, i64) -> i64 + Send + Sync`, so named
/// functions and closures register without wrapping.
pub trait BinaryOperation: Send + Sync {
    fn apply(&self, a: i64, b: i64) -> i64;
}

impl<F> BinaryOperation for F
where
    F: Fn(i64, i64) -> i64 + Send + Sync,
{
    #[inline]
    fn apply(&self, a: i64, b: i64) -> i64 {
        self(a, b)
    }
}

/// Registry lookup error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("operation not found: {name}")]
    NotFound { name: String },
}

impl RegistryError {
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

type OperationMap = IndexMap<Arc<str>, Arc<dyn BinaryOperation>>;

/// Mapping from operation name to operation.
pub struct OperationRegistry {
    map: RwLock<OperationMap>,
}

impl OperationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RwLock::new(IndexMap::new()),
        }
    }

    /// Registry preloaded with `add`, `subtract` and `multiply`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("add", higher_order::add);
        registry.register("subtract", higher_order::subtract);
        registry.register("multiply", higher_order::multiply);
        registry
    }

    /// Register `operation` under `name`, replacing any previous entry.
    pub fn register<O>(&self, name: impl Into<Arc<str>>, operation: O)
    where
        O: BinaryOperation + 'static,
    {
        self.register_arc(name, Arc::new(operation));
    }

    /// Register an already shared operation under `name`.
    pub fn register_arc(&self, name: impl Into<Arc<str>>, operation: Arc<dyn BinaryOperation>) {
        let name = name.into();
        let mut w = self.map.write();
        if w.insert(Arc::clone(&name), operation).is_some() {
            debug!(operation = %name, "operation replaced");
        } else {
            debug!(operation = %name, "operation registered");
        }
    }

    /// Fetch the operation registered under `name`.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if no operation has that name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn BinaryOperation>, RegistryError> {
        self.map
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(name))
    }

    /// Look up `name` and invoke it with `(a, b)`.
    ///
    /// The read lock is released before the operation runs, so an operation
    /// may itself use the registry.
    ///
    /// # Errors
    /// Returns `RegistryError::NotFound` if no operation has that name.
    pub fn dispatch(&self, name: &str, a: i64, b: i64) -> Result<i64, RegistryError> {
        let operation = self.get(name).inspect_err(|_| {
            debug!(operation = name, "dispatch to unknown operation");
        })?;
        let result = operation.apply(a, b);
        debug!(operation = name, a, b, result, "operation dispatched");
        Ok(result)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.read().contains_key(name)
    }

    /// Remove an operation; returns it if it was present.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn BinaryOperation>> {
        self.map.write().shift_remove(name)
    }

    /// Registered names in first-registration order.
    #[must_use]
    pub fn names(&self) -> Vec<Arc<str>> {
        self.map.read().keys().cloned().collect()
    }

    /// Clear everything (useful in tests).
    pub fn clear(&self) {
        self.map.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::higher_order::{add, make_multiplier, multiply};
    use tracing_test::traced_test;

    #[test]
    fn register_and_dispatch_named_function() {
        let registry = OperationRegistry::new();
        registry.register("add", add);
        assert_eq!(registry.dispatch("add", 5, 3).unwrap(), 8);
    }

    #[test]
    fn dispatch_unknown_name_is_not_found() {
        let registry = OperationRegistry::with_builtins();
        let err = registry.dispatch("nonexistent", 1, 2).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err, RegistryError::not_found("nonexistent"));
        assert_eq!(err.to_string(), "operation not found: nonexistent");
    }

    #[test]
    fn inline_closures_register_like_functions() {
        let registry = OperationRegistry::new();
        registry.register("subtract", |a: i64, b: i64| a - b);
        assert_eq!(registry.dispatch("subtract", 10, 5).unwrap(), 5);
    }

    #[test]
    fn factory_closures_can_be_adapted_into_operations() {
        let registry = OperationRegistry::new();
        let tripler = make_multiplier(3);
        registry.register("triple_sum", move |a: i64, b: i64| tripler(a + b));
        assert_eq!(registry.dispatch("triple_sum", 2, 5).unwrap(), 21);
    }

    #[test]
    fn re_registering_overwrites_previous_operation() {
        let registry = OperationRegistry::new();
        registry.register("op", add);
        registry.register("op", multiply);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.dispatch("op", 5, 3).unwrap(), 15);
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let registry = OperationRegistry::with_builtins();
        registry.register("add", |a: i64, b: i64| a + b + 1);

        let names: Vec<String> = registry.names().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["add", "subtract", "multiply"]);
        assert_eq!(registry.dispatch("add", 1, 1).unwrap(), 3);
    }

    #[test]
    fn fetched_operation_survives_overwrite_and_removal() {
        let registry = OperationRegistry::new();
        registry.register("op", add);
        let held = registry.get("op").unwrap();

        registry.register("op", multiply);
        assert_eq!(held.apply(2, 3), 5);

        assert!(registry.remove("op").is_some());
        assert!(!registry.contains("op"));
        assert_eq!(held.apply(2, 3), 5);
    }

    #[test]
    fn remove_missing_returns_none() {
        let registry = OperationRegistry::new();
        assert!(registry.remove("missing").is_none());
    }

    #[test]
    fn clear_empties_registry() {
        let registry = OperationRegistry::with_builtins();
        assert!(!registry.is_empty());
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get("add").is_err());
    }

    #[test]
    fn operation_may_reenter_registry() {
        let registry = Arc::new(OperationRegistry::with_builtins());
        let inner = Arc::clone(&registry);
        registry.register("add_then_double", move |a: i64, b: i64| {
            let sum = inner.dispatch("add", a, b).unwrap_or_default();
            inner.dispatch("multiply", sum, 2).unwrap_or_default()
        });
        assert_eq!(registry.dispatch("add_then_double", 3, 4).unwrap(), 14);
    }

    #[traced_test]
    #[test]
    fn registration_and_misses_are_logged() {
        let registry = OperationRegistry::new();
        registry.register("op", add);
        registry.register("op", multiply);
        assert!(registry.dispatch("missing", 1, 2).is_err());

        assert!(logs_contain("operation registered"));
        assert!(logs_contain("operation replaced"));
        assert!(logs_contain("dispatch to unknown operation"));
    }

    #[test]
    fn debug_lists_names() {
        let registry = OperationRegistry::with_builtins();
        let dbg = format!("{registry:?}");
        assert!(dbg.contains("subtract"));
    }
}
