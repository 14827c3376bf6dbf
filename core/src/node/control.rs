//! Conditionals, `return`, and statement sequences.

use super::{Compute, NodeRef};
use crate::{
    context::Context,
    value::{DEFAULT_VALUE, Value, is_truthy},
};

/// Runs `body` when `condition` is truthy. Always yields `0`; the body's
/// result is discarded.
#[derive(Debug, Clone, Copy)]
pub struct If<C, B> {
    pub condition: C,
    pub body: B,
}

impl<C, B> If<C, B> {
    pub const fn new(condition: C, body: B) -> Self {
        Self { condition, body }
    }
}

impl<C: Compute, B: Compute> Compute for If<C, B> {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        if is_truthy(self.condition.compute(ctx)) {
            self.body.compute(ctx);
        }
        DEFAULT_VALUE
    }
}

/// Evaluates exactly one branch and yields its result.
#[derive(Debug, Clone, Copy)]
pub struct IfElse<C, T, E> {
    pub condition: C,
    pub then_branch: T,
    pub else_branch: E,
}

impl<C, T, E> IfElse<C, T, E> {
    pub const fn new(condition: C, then_branch: T, else_branch: E) -> Self {
        Self {
            condition,
            then_branch,
            else_branch,
        }
    }
}

impl<C: Compute, T: Compute, E: Compute> Compute for IfElse<C, T, E> {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        if is_truthy(self.condition.compute(ctx)) {
            self.then_branch.compute(ctx)
        } else {
            self.else_branch.compute(ctx)
        }
    }
}

/// Stores its operand as the pending return value and yields `0`.
#[derive(Debug, Clone, Copy)]
pub struct Return<V> {
    pub value: V,
}

impl<V> Return<V> {
    pub const fn new(value: V) -> Self {
        Self { value }
    }
}

impl<V: Compute> Compute for Return<V> {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        let value = self.value.compute(ctx);
        ctx.signal_return(value);
        DEFAULT_VALUE
    }
}

/// An ordered statement sequence.
///
/// Stops after the first statement that leaves a return pending and yields
/// the pending value (or `0` if nothing returned). The return flag is left
/// set so enclosing sequences stop too; only call exit clears it.
#[derive(Clone, Copy)]
pub struct Block<'a> {
    statements: &'a [NodeRef<'a>],
}

impl<'a> Block<'a> {
    pub const fn new(statements: &'a [NodeRef<'a>]) -> Self {
        Self { statements }
    }

    pub const fn len(&self) -> usize {
        self.statements.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Compute for Block<'_> {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        for statement in self.statements {
            statement.evaluate(ctx);
            if ctx.is_returning() {
                break;
            }
        }
        ctx.pending_return()
    }
}
