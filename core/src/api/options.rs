//! Configuration options for the engine.

use crate::context::DEFAULT_STACK_SIZE;

/// Which lowering a [`FunctionDef`](crate::expr::FunctionDef) goes through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tier {
    /// One node per description node, all children type-erased.
    Generic,
    /// Known shapes replaced by specialized nodes.
    #[default]
    Fused,
}

/// What the driver does after a run that hit a soft failure.
///
/// Evaluation never branches on this: the run always completes with default
/// values substituted. The policy only decides whether the driver reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Return the (degraded) result as if nothing happened.
    #[default]
    Saturate,
    /// Return [`EvalError::StackExhausted`](super::EvalError::StackExhausted).
    Error,
}

/// Configuration options for the engine.
///
/// # Example
///
/// ```
/// use nodefuse_core::api::{EngineOptions, OverflowPolicy, Tier};
///
/// let options = EngineOptions {
///     stack_size: 256,
///     tier: Tier::Generic,
///     overflow: OverflowPolicy::Error,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Slots in the argument stack. At most `stack_size - 1` calls can be
    /// active at once; deeper calls yield `0`.
    ///
    /// Evaluation recurses on the host stack, so very large values need a
    /// correspondingly large thread stack.
    ///
    /// Default: 1024
    pub stack_size: usize,

    /// Default: [`Tier::Fused`]
    pub tier: Tier,

    /// Default: [`OverflowPolicy::Saturate`]
    pub overflow: OverflowPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            tier: Tier::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}
