#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Tree-walking evaluator for single-argument recursive integer functions,
//! built around node fusion.
//!
//! A function description ([`expr::FunctionDef`]) is lowered into a tree of
//! nodes ([`node`]) that evaluate against a per-run [`context::Context`].
//! The generic tier keeps one type-erased node per description node; the
//! fused tier ([`lower::fused()`]) replaces known shapes with specialized nodes
//! that the compiler can inline through.

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, vec::Vec};

pub mod api;
pub mod context;
pub mod expr;
pub mod lower;
pub mod node;
pub mod value;


pub use api::{BuildError, CompiledFunction, Engine, EngineOptions, EvalError, OverflowPolicy, Tier};
pub use context::{Context, DEFAULT_STACK_SIZE};
pub use value::{DEFAULT_VALUE, Value};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_fused_lowering() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
