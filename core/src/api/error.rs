//! Errors surfaced by tree construction and by the driver.
//!
//! Node evaluation itself has no error path: soft failures produce `0` and are
//! only counted. [`EvalError`] is raised by the driver after a run, when the
//! configured [`OverflowPolicy`](super::OverflowPolicy) asks for it.

use thiserror::Error;

/// Failure while building or lowering a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A function description with no statements.
    #[error("function body is empty")]
    EmptyBody,

    /// A callable's body was set twice.
    #[error("callable is already defined")]
    AlreadyDefined,
}

/// Failure reported for a completed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// At least one call or argument read hit the stack bound and was
    /// replaced by the default value.
    #[error(
        "argument stack exhausted: {soft_failures} soft failure(s) with a stack of {stack_size} slots"
    )]
    StackExhausted {
        soft_failures: usize,
        stack_size: usize,
    },
}
