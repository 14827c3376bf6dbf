//! Public driver API.
//!
//! An [`Engine`] lowers a [`FunctionDef`](crate::expr::FunctionDef) into a node
//! tree of the configured tier; the resulting [`CompiledFunction`] evaluates
//! calls.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use nodefuse_core::api::{Engine, EngineOptions};
//! use nodefuse_core::expr::ExprBuilder;
//!
//! let arena = Bump::new();
//! let engine = Engine::new(&arena, EngineOptions::default());
//! let fib = engine.compile(&ExprBuilder::new(&arena).fibonacci()).unwrap();
//! assert_eq!(fib.run(10).unwrap(), 55);
//! ```

pub mod engine;
pub mod error;
pub mod options;


pub use engine::{CompiledFunction, Engine};
pub use error::{BuildError, EvalError};
pub use options::{EngineOptions, OverflowPolicy, Tier};
