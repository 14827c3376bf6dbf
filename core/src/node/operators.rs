//! Binary operator nodes.
//!
//! Operands are evaluated left first, each exactly once. Arithmetic wraps.

use super::Compute;
use crate::{
    context::Context,
    value::{Value, from_bool},
};

macro_rules! binary_node {
    ($(#[$doc:meta])* $name:ident, |$l:ident, $r:ident| $combine:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<L, R> {
            pub lhs: L,
            pub rhs: R,
        }

        impl<L, R> $name<L, R> {
            pub const fn new(lhs: L, rhs: R) -> Self {
                Self { lhs, rhs }
            }
        }

        impl<L: Compute, R: Compute> Compute for $name<L, R> {
            #[inline(always)]
            fn compute(&self, ctx: &mut Context) -> Value {
                let $l = self.lhs.compute(ctx);
                let $r = self.rhs.compute(ctx);
                $combine
            }
        }
    };
}

binary_node!(
    /// `lhs + rhs`
    Add,
    |l, r| l.wrapping_add(r)
);

binary_node!(
    /// `lhs - rhs`
    Sub,
    |l, r| l.wrapping_sub(r)
);

binary_node!(
    /// `lhs < rhs`, yielding `1` or `0`.
    Less,
    |l, r| from_bool(l < r)
);
