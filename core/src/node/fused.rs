//! Fused leaf shapes.
//!
//! Each node replaces a binary operator whose left child is [`Arg`] and whose
//! right child is [`Const`], keeping only the constant. The argument is read
//! before the constant is produced, matching the unfused operand order.
//!
//! [`Arg`]: super::Arg
//! [`Const`]: super::Const

use super::Compute;
use crate::{
    context::Context,
    value::{Value, from_bool},
};

macro_rules! arg_const_node {
    ($(#[$doc:meta])* $name:ident, |$arg:ident, $constant:ident| $combine:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            constant: Value,
        }

        impl $name {
            pub const fn new(constant: Value) -> Self {
                Self { constant }
            }

            pub const fn constant(&self) -> Value {
                self.constant
            }
        }

        impl Compute for $name {
            #[inline(always)]
            fn compute(&self, ctx: &mut Context) -> Value {
                let $arg = ctx.arg();
                let $constant = self.constant;
                $combine
            }
        }
    };
}

arg_const_node!(
    /// `Add(Arg, Const)`
    ArgAddConst,
    |arg, constant| arg.wrapping_add(constant)
);

arg_const_node!(
    /// `Sub(Arg, Const)`
    ArgSubConst,
    |arg, constant| arg.wrapping_sub(constant)
);

arg_const_node!(
    /// `Less(Arg, Const)`
    ArgLessConst,
    |arg, constant| from_bool(arg < constant)
);
