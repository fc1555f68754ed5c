//! Command implementations.
//!
//! Every command writes its results to the given writer so the output can
//! be captured in tests.

use std::io::Write;

use anyhow::{Context, Result};
use fnkit::{
    AccumulatorFactory, FnkitConfig, OperationRegistry, add, apply_via_higher_order, compose,
    fetch_with_callback, greet, make_multiplier, multiply, sum_and_product,
};
use tracing::info;

/// Accumulator factory and registry built from the effective configuration.
pub struct App {
    factory: AccumulatorFactory,
    registry: OperationRegistry,
}

impl App {
    #[must_use]
    pub fn from_config(cfg: &FnkitConfig) -> Self {
        let registry = if cfg.registry.builtins {
            OperationRegistry::with_builtins()
        } else {
            OperationRegistry::new()
        };
        let factory = AccumulatorFactory::from_config(&cfg.accumulator);
        info!(
            k1 = factory.constants().k1,
            k2 = factory.constants().k2,
            overflow = ?factory.policy(),
            operations = registry.len(),
            "fnkit initialized"
        );
        Self { factory, registry }
    }

    /// Creates `instances` accumulators from the same seed and calls each
    /// one `times` times, one instance after the other.
    pub fn accumulate(
        &self,
        out: &mut dyn Write,
        initial: i64,
        times: usize,
        instances: usize,
    ) -> Result<()> {
        for instance in 1..=instances {
            let mut acc = self.factory.create(initial);
            for call in 1..=times {
                writeln!(out, "accumulator {instance} call {call}: {}", acc())?;
            }
        }
        Ok(())
    }

    pub fn dispatch(&self, out: &mut dyn Write, name: &str, a: i64, b: i64) -> Result<()> {
        let result = self.registry.dispatch(name, a, b)?;
        writeln!(out, "{name}({a}, {b}) = {result}")?;
        Ok(())
    }

    /// Looks `name` up and hands the operation to the higher-order applier.
    pub fn apply(&self, out: &mut dyn Write, name: &str, a: i64, b: i64) -> Result<()> {
        let operation = self.registry.get(name)?;
        let result = apply_via_higher_order(a, b, &*operation);
        writeln!(out, "apply_via_higher_order({a}, {b}, {name}) = {result}")?;
        Ok(())
    }

    pub fn list(&self, out: &mut dyn Write) -> Result<()> {
        for name in self.registry.names() {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }
}

pub fn multiply_by(out: &mut dyn Write, factor: i64, x: i64) -> Result<()> {
    let multiplier = make_multiplier(factor);
    writeln!(out, "{x} * {factor} = {}", multiplier(x))?;
    Ok(())
}

/// The callback writes the payload; a failed write surfaces as the
/// command's error.
pub fn fetch(out: &mut dyn Write, id: i64) -> Result<()> {
    fetch_with_callback(id, |data| writeln!(out, "Received: {data}"))
        .context("callback failed to write payload")
}

pub fn render_yaml(cfg: &FnkitConfig) -> Result<String> {
    serde_saphyr::to_string(cfg).context("failed to render configuration as YAML")
}

/// Walks through every building block with fixed inputs.
///
/// Uses its own registry so the output does not depend on
/// `registry.builtins`.
pub fn tour(app: &App, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "1. Parameters vs arguments")?;
    writeln!(out, "  add(10, 5) = {}", add(10, 5))?;

    writeln!(out, "2. First-order functions")?;
    writeln!(out, "  {}", greet("Alice"))?;
    let (sum, product) = sum_and_product(10, 20);
    writeln!(out, "  sum_and_product(10, 20) = ({sum}, {product})")?;
    #[allow(clippy::redundant_closure_call)]
    let iife = (|x: i64, y: i64| x * y)(4, 5);
    writeln!(out, "  immediately invoked: 4 * 5 = {iife}")?;

    writeln!(out, "3. Higher-order functions")?;
    let times = |a: i64, b: i64| a * b;
    writeln!(
        out,
        "  apply_via_higher_order(5, 3, multiply) = {}",
        apply_via_higher_order(5, 3, &times)
    )?;
    let doubler = make_multiplier(2);
    let tripler = make_multiplier(3);
    writeln!(out, "  doubler(7) = {}", doubler(7))?;
    writeln!(out, "  tripler(7) = {}", tripler(7))?;

    writeln!(out, "4. Callbacks")?;
    fetch_with_callback(42, |data| writeln!(out, "  Received: {data}"))?;

    writeln!(out, "5. Functions as values")?;
    let operations = OperationRegistry::new();
    operations.register("add", add);
    operations.register("subtract", |a: i64, b: i64| a - b);
    operations.register("multiply", multiply);
    operations.register("double_sum", compose(add, doubler));
    for name in ["add", "multiply", "double_sum"] {
        writeln!(out, "  {name}(5, 3) = {}", operations.dispatch(name, 5, 3)?)?;
    }
    let subtract = operations.get("subtract")?;
    writeln!(
        out,
        "  apply_via_higher_order(10, 2, subtract) = {}",
        apply_via_higher_order(10, 2, &*subtract)
    )?;

    writeln!(out, "6. Closures with private state")?;
    app.accumulate(out, 100, 2, 2)?;
    Ok(())
}
