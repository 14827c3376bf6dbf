//! The compilation and evaluation driver.

use bumpalo::Bump;

use super::{BuildError, EngineOptions, EvalError, OverflowPolicy, Tier};
use crate::{
    context::Context,
    expr::FunctionDef,
    lower::{self, FusionStats},
    node::{Callable, invoke},
    value::Value,
};

/// Lowers function descriptions into node trees allocated in `'arena`.
pub struct Engine<'arena> {
    arena: &'arena Bump,
    options: EngineOptions,
}

impl<'arena> Engine<'arena> {
    pub fn new(arena: &'arena Bump, options: EngineOptions) -> Self {
        Self { arena, options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Lowers `def` with the configured [`Tier`].
    ///
    /// The returned function borrows the arena; its nodes are released when
    /// the arena is dropped.
    pub fn compile(
        &self,
        def: &FunctionDef<'arena>,
    ) -> Result<CompiledFunction<'arena>, BuildError> {
        let (entry, fusion_stats) = match self.options.tier {
            Tier::Generic => {
                let function: &'arena (dyn Callable + 'arena) = lower::generic(self.arena, def)?;
                (function, None)
            }
            Tier::Fused => {
                let (callee, stats) = lower::fused(self.arena, def)?;
                let callee: &'arena (dyn Callable + 'arena) = callee;
                (callee, Some(stats))
            }
        };

        tracing::debug!(
            tier = ?self.options.tier,
            arena_bytes = self.arena.allocated_bytes(),
            "compiled function"
        );

        Ok(CompiledFunction {
            entry,
            tier: self.options.tier,
            fusion_stats,
            stack_size: self.options.stack_size,
            overflow: self.options.overflow,
        })
    }
}

/// A lowered function ready to be called.
pub struct CompiledFunction<'a> {
    entry: &'a (dyn Callable + 'a),
    tier: Tier,
    fusion_stats: Option<FusionStats>,
    stack_size: usize,
    overflow: OverflowPolicy,
}

impl<'a> CompiledFunction<'a> {
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Rewrites applied by the fusion pass; `None` for the generic tier.
    pub fn fusion_stats(&self) -> Option<FusionStats> {
        self.fusion_stats
    }

    /// The callable at the root of the tree.
    pub fn entry(&self) -> &'a (dyn Callable + 'a) {
        self.entry
    }

    /// A fresh context sized by the engine options.
    pub fn new_context(&self) -> Context {
        Context::new(self.stack_size)
    }

    /// Evaluates `f(argument)` with a fresh context.
    pub fn run(&self, argument: Value) -> Result<Value, EvalError> {
        let mut ctx = self.new_context();
        self.run_with(&mut ctx, argument)
    }

    /// Evaluates `f(argument)` with a caller-owned context and applies the
    /// overflow policy to the soft failures of this run only.
    pub fn run_with(&self, ctx: &mut Context, argument: Value) -> Result<Value, EvalError> {
        let soft_failures_before = ctx.soft_failures();
        let value = self.run_unchecked(ctx, argument);
        let soft_failures = ctx.soft_failures() - soft_failures_before;

        tracing::trace!(argument, value, soft_failures, "evaluated call");

        if soft_failures == 0 {
            return Ok(value);
        }
        tracing::warn!(
            argument,
            soft_failures,
            stack_size = ctx.stack_size(),
            "argument stack exhausted; defaults substituted"
        );
        match self.overflow {
            OverflowPolicy::Saturate => Ok(value),
            OverflowPolicy::Error => Err(EvalError::StackExhausted {
                soft_failures,
                stack_size: ctx.stack_size(),
            }),
        }
    }

    /// Evaluates `f(argument)` without logging or policy checks.
    #[inline]
    pub fn run_unchecked(&self, ctx: &mut Context, argument: Value) -> Value {
        let top = ctx.stack_top();
        let value = invoke(self.entry, argument, ctx);
        debug_assert_eq!(ctx.stack_top(), top, "unbalanced argument stack");
        debug_assert!(!ctx.is_returning(), "return flag leaked out of a call");
        value
    }
}

impl core::fmt::Debug for CompiledFunction<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompiledFunction")
            .field("tier", &self.tier)
            .field("fusion_stats", &self.fusion_stats)
            .field("stack_size", &self.stack_size)
            .field("overflow", &self.overflow)
            .finish()
    }
}
