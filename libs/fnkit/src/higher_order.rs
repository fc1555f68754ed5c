//! Functions as values.
//!
//! First-order building blocks (`add`, `subtract`, `multiply`, `greet`,
//! `sum_and_product`) and the higher-order helpers that take or return
//! functions: [`apply_via_higher_order`], [`make_multiplier`] and
//! [`compose`].
//!
//! Arithmetic wraps on overflow, like fixed-width machine integers.

use crate::registry::BinaryOperation;

#[must_use]
pub const fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

#[must_use]
pub const fn subtract(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

#[must_use]
pub const fn multiply(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// Sum and product of two numbers in one call.
#[must_use]
pub const fn sum_and_product(a: i64, b: i64) -> (i64, i64) {
    (add(a, b), multiply(a, b))
}

#[must_use]
pub fn greet(name: &str) -> String {
    format!("Hello, {name}")
}

/// Invokes `operation` on `(a, b)`.
///
/// `operation` is the parameter; whatever function value the caller passes
/// at the call site is the argument.
pub fn apply_via_higher_order<O>(a: i64, b: i64, operation: &O) -> i64
where
    O: BinaryOperation + ?Sized,
{
    operation.apply(a, b)
}

/// Returns a closure multiplying its argument by `factor`.
///
/// `factor` is captured by value; each call yields an independent closure.
pub fn make_multiplier(factor: i64) -> impl Fn(i64) -> i64 + Send + Sync + Copy {
    move |x| x.wrapping_mul(factor)
}

/// Wraps a binary operation so its result is passed through `post`.
pub fn compose<O, P>(operation: O, post: P) -> impl Fn(i64, i64) -> i64 + Send + Sync
where
    O: BinaryOperation,
    P: Fn(i64) -> i64 + Send + Sync,
{
    move |a, b| post(operation.apply(a, b))
}
