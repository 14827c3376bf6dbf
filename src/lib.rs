//! nodefuse - A fast tree-walking evaluator for recursive integer functions
//!
//! # Overview
//!
//! A function of one integer argument is described as a small expression
//! tree ([`FunctionDef`]), lowered into evaluation nodes, and called any
//! number of times. Two lowerings are available:
//!
//! 1. **Generic tier** ([`Tier::Generic`]): one node per description node,
//!    every edge a dynamic call
//! 2. **Fused tier** ([`Tier::Fused`]): known shapes such as `n - 1`,
//!    `f(n - 1) + f(n - 2)` or `n < 2 ? ... : ...` become specialized nodes
//!    with statically-typed children
//!
//! Both tiers give identical results. Recursion depth is bounded by the
//! argument stack; calls past the bound yield `0` instead of failing.
//!
//! # Quick Start
//!
//! ```
//! use nodefuse::{Bump, Engine, EngineOptions, ExprBuilder, FunctionDef};
//!
//! // Nodes live in the arena and are released with it
//! let arena = Bump::new();
//! let engine = Engine::new(&arena, EngineOptions::default());
//!
//! // if (n < 2) return n; return f(n - 1) + f(n - 2);
//! let b = ExprBuilder::new(&arena);
//! let fib = FunctionDef::new(b.statements(&[
//!     b.if_then(b.less(b.arg(), b.int(2)), b.ret(b.arg())),
//!     b.ret(b.add(b.call(b.sub(b.arg(), b.int(1))), b.call(b.sub(b.arg(), b.int(2))))),
//! ]));
//!
//! let fib = engine.compile(&fib).unwrap();
//! assert_eq!(fib.run(30).unwrap(), 832040);
//! ```
//!
//! # Stack Exhaustion
//!
//! With the default [`OverflowPolicy::Saturate`] a run that ran out of stack
//! still returns its (degraded) value. [`OverflowPolicy::Error`] turns the
//! same run into [`EvalError::StackExhausted`]:
//!
//! ```
//! use nodefuse::{Bump, Engine, EngineOptions, EvalError, ExprBuilder, OverflowPolicy};
//!
//! let arena = Bump::new();
//! let options = EngineOptions {
//!     stack_size: 16,
//!     overflow: OverflowPolicy::Error,
//!     ..Default::default()
//! };
//! let fib = Engine::new(&arena, options)
//!     .compile(&ExprBuilder::new(&arena).fibonacci())
//!     .unwrap();
//!
//! assert_eq!(fib.run(10), Ok(55));
//! assert!(matches!(fib.run(40), Err(EvalError::StackExhausted { .. })));
//! ```

// Re-export public API from nodefuse_core
pub use nodefuse_core::api::{
    BuildError, CompiledFunction, Engine, EngineOptions, EvalError, OverflowPolicy, Tier,
};

// Re-export description and evaluation types
pub use nodefuse_core::context::{Context, DEFAULT_STACK_SIZE};
pub use nodefuse_core::expr::{self, BinaryOp, Expr, ExprBuilder, FunctionDef};
pub use nodefuse_core::lower::FusionStats;
pub use nodefuse_core::value::{DEFAULT_VALUE, Value};
pub use nodefuse_core::{lower, node};

// Re-export the arena so callers don't need a direct bumpalo dependency
pub use bumpalo::Bump;
