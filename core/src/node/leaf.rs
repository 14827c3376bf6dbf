//! Terminal nodes.

use super::Compute;
use crate::{context::Context, value::Value};

/// A literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const {
    value: Value,
}

impl Const {
    pub const fn new(value: Value) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> Value {
        self.value
    }
}

impl Compute for Const {
    #[inline(always)]
    fn compute(&self, _ctx: &mut Context) -> Value {
        self.value
    }
}

/// The argument of whichever call frame is active when evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arg;

impl Compute for Arg {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        ctx.arg()
    }
}
