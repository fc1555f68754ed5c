//! Accumulator factory.
//!
//! Every accumulator is a closure owning one private `i64` state cell. Each
//! call advances the cell by the two shared constants `k1` and `k2` and
//! returns the new value. The constants sit behind an `Arc` handed out by the
//! factory, so all accumulators of one factory reference the same pair.
//!
//! Two accumulators never share a cell, even when created with the same
//! initial value: every [`AccumulatorFactory::create`] call moves a fresh
//! `i64` into its closure.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::AccumulatorConfig;

/// Type-erased accumulator, for storing several in one collection.
pub type Accumulator = Box<dyn FnMut() -> i64 + Send>;

/// The two constants added to an accumulator's state on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorConstants {
    pub k1: i64,
    pub k2: i64,
}

impl AccumulatorConstants {
    pub const DEFAULT_K1: i64 = 10;
    pub const DEFAULT_K2: i64 = 100;

    #[must_use]
    pub const fn new(k1: i64, k2: i64) -> Self {
        Self { k1, k2 }
    }
}

impl Default for AccumulatorConstants {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K1, Self::DEFAULT_K2)
    }
}

/// Integer overflow behavior for accumulator updates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Two's complement wraparound.
    #[default]
    Wrap,
    /// Clamp at `i64::MIN` / `i64::MAX`.
    Saturate,
}

impl OverflowPolicy {
    /// Adds `rhs` to `lhs` under this policy.
    #[must_use]
    pub const fn add(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Self::Wrap => lhs.wrapping_add(rhs),
            Self::Saturate => lhs.saturating_add(rhs),
        }
    }
}

/// Produces independent accumulator closures over shared constants.
///
/// Cloning a factory shares its constants; it does not copy them.
#[derive(Debug, Clone, Default)]
pub struct AccumulatorFactory {
    constants: Arc<AccumulatorConstants>,
    policy: OverflowPolicy,
}

impl AccumulatorFactory {
    #[must_use]
    pub fn new(constants: AccumulatorConstants, policy: OverflowPolicy) -> Self {
        Self {
            constants: Arc::new(constants),
            policy,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &AccumulatorConfig) -> Self {
        Self::new(AccumulatorConstants::new(cfg.k1, cfg.k2), cfg.overflow)
    }

    #[must_use]
    pub fn constants(&self) -> &AccumulatorConstants {
        &self.constants
    }

    /// Handle to the constants shared by every accumulator of this factory.
    #[must_use]
    pub fn shared_constants(&self) -> Arc<AccumulatorConstants> {
        Arc::clone(&self.constants)
    }

    #[must_use]
    pub const fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Creates a new accumulator starting at `initial_state`.
    ///
    /// The returned closure computes `state + (k1 + k2)`, stores it and
    /// returns it on every call. The increment and the update both follow
    /// the factory's overflow policy.
    pub fn create(&self, initial_state: i64) -> impl FnMut() -> i64 + Send + use<> {
        let constants = Arc::clone(&self.constants);
        let policy = self.policy;
        let mut state = initial_state;

        move || {
            let step = policy.add(constants.k1, constants.k2);
            state = policy.add(state, step);
            trace!(state, "accumulator advanced");
            state
        }
    }

    /// Same as [`create`](Self::create), boxed.
    #[must_use]
    pub fn create_boxed(&self, initial_state: i64) -> Accumulator {
        Box::new(self.create(initial_state))
    }
}

static DEFAULT_FACTORY: LazyLock<AccumulatorFactory> = LazyLock::new(AccumulatorFactory::default);

/// Creates an accumulator over the process-wide default constants
/// (`k1 = 10`, `k2 = 100`, wrapping).
pub fn create_accumulator(initial_state: i64) -> impl FnMut() -> i64 + Send + use<> {
    DEFAULT_FACTORY.create(initial_state)
}
