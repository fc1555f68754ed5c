//! fnkit: stateful closures and name-addressed operations.
//!
//! Two independent building blocks:
//!
//! - [`accumulator`]: a factory producing closures that each own a private
//!   integer state cell and advance it by two shared constants on every call.
//! - [`registry`]: a mapping from operation names to binary integer
//!   functions, dispatched by name or handed to a higher-order applier.
//!
//! [`higher_order`] holds the function-as-value helpers (applier, multiplier
//! factory, composition) and [`callback`] the synchronous callback idiom.
//!
//! ## Usage
//!
//! ```
//! use fnkit::{OperationRegistry, create_accumulator, make_multiplier};
//!
//! let mut balance = create_accumulator(100);
//! assert_eq!(balance(), 210);
//! assert_eq!(balance(), 320);
//!
//! let registry = OperationRegistry::with_builtins();
//! assert_eq!(registry.dispatch("add", 5, 3).unwrap(), 8);
//!
//! let doubler = make_multiplier(2);
//! assert_eq!(doubler(7), 14);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod accumulator;
pub mod callback;
pub mod config;
pub mod higher_order;
pub mod registry;

pub use accumulator::{
    Accumulator, AccumulatorConstants, AccumulatorFactory, OverflowPolicy, create_accumulator,
};
pub use callback::{fetch_with_callback, format_payload};
pub use config::{
    AccumulatorConfig, ConfigError, FnkitConfig, LogFormat, LoggingConfig, RegistryConfig,
};
pub use higher_order::{
    add, apply_via_higher_order, compose, greet, make_multiplier, multiply, subtract,
    sum_and_product,
};
pub use registry::{BinaryOperation, OperationRegistry, RegistryError};
