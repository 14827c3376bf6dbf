//! Evaluation nodes.
//!
//! Every node type exposes two operations with identical semantics:
//!
//! - [`Compute::compute`]: statically dispatched and force-inlined. Usable by
//!   code that holds the node by its concrete type, typically a parent node
//!   whose child type parameter names it.
//! - [`Node::evaluate`]: object-safe. Usable through a [`NodeRef`] when the
//!   concrete type has been erased.
//!
//! Node structs are generic over their children. Instantiating a child
//! parameter with [`NodeRef`] gives the generic tier (one virtual call per
//! edge); instantiating it with a concrete node type gives the fused tier,
//! where the compiler sees through the whole composition.
//!
//! ```ignore
//! // Generic tier: `n - 1` as three nodes and two dynamic calls.
//! let generic: Sub<NodeRef, NodeRef> = Sub::new(arena.alloc(Arg), arena.alloc(Const::new(1)));
//! // Fused tier: the same computation as one node holding only the constant.
//! let fused = ArgSubConst::new(1);
//! ```

mod call;
mod control;
mod fused;
mod leaf;
mod operators;


#[cfg(test)]
mod fused_test;

pub use call::{Call, Callable, Callee, Function, invoke};
pub use control::{Block, If, IfElse, Return};
pub use fused::{ArgAddConst, ArgLessConst, ArgSubConst};
pub use leaf::{Arg, Const};
pub use operators::{Add, Less, Sub};

use crate::{context::Context, value::Value};

/// Statically dispatched evaluation.
pub trait Compute {
    fn compute(&self, ctx: &mut Context) -> Value;
}

/// Type-erased evaluation; implemented for every [`Compute`] type.
pub trait Node {
    fn evaluate(&self, ctx: &mut Context) -> Value;
}

impl<T: Compute> Node for T {
    #[inline]
    fn evaluate(&self, ctx: &mut Context) -> Value {
        self.compute(ctx)
    }
}

/// A non-owning handle to a node of unknown concrete type.
pub type NodeRef<'a> = &'a (dyn Node + 'a);

// Lets a generic node hold a type-erased child in any child position.
impl Compute for &(dyn Node + '_) {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        (**self).evaluate(ctx)
    }
}
