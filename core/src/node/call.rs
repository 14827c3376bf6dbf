//! Call mechanics and the two kinds of callables.
//!
//! A callable must be nameable before its body exists, because the body
//! refers back to it. Both callables are therefore write-once slots: allocate
//! the empty callable in the arena, hand its address to every call site that
//! needs it, then define the body exactly once.
//!
//! ```ignore
//! let function = arena.alloc(Function::new());
//! let recurse = arena.alloc(Call::new(&*function, argument));
//! function.define(arena.alloc_slice_copy(&[recurse as NodeRef]))?;
//! ```

use core::cell::OnceCell;

use super::{Block, Compute, Const, NodeRef};
use crate::{api::BuildError, context::Context, value::Value};

/// Something a [`Call`] can transfer control to.
pub trait Callable {
    /// Runs the body inside a frame the caller has already pushed.
    fn run_body(&self, ctx: &mut Context) -> Value;
}

/// A function as an ordered list of statements. Its result is the value of
/// the `Return` that ended it, or `0` if none ran.
#[derive(Default)]
pub struct Function<'a> {
    body: OnceCell<Block<'a>>,
}

impl<'a> Function<'a> {
    pub const fn new() -> Self {
        Self {
            body: OnceCell::new(),
        }
    }

    /// Sets the body. Fails if the function was already defined.
    pub fn define(&self, statements: &'a [NodeRef<'a>]) -> Result<(), BuildError> {
        self.body
            .set(Block::new(statements))
            .map_err(|_| BuildError::AlreadyDefined)
    }

    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }
}

impl Callable for Function<'_> {
    #[inline(always)]
    fn run_body(&self, ctx: &mut Context) -> Value {
        match self.body.get() {
            Some(body) => body.compute(ctx),
            None => ctx.soft_fail(),
        }
    }
}

impl core::fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Function")
            .field("statements", &self.body.get().map(Block::len))
            .finish()
    }
}

/// A single node acting as both the callable and its own body.
#[derive(Default)]
pub struct Callee<'a> {
    body: OnceCell<NodeRef<'a>>,
}

impl<'a> Callee<'a> {
    pub const fn new() -> Self {
        Self {
            body: OnceCell::new(),
        }
    }

    /// Sets the body node. Fails if the callee was already defined.
    pub fn define(&self, body: NodeRef<'a>) -> Result<(), BuildError> {
        self.body.set(body).map_err(|_| BuildError::AlreadyDefined)
    }

    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }
}

impl Callable for Callee<'_> {
    #[inline(always)]
    fn run_body(&self, ctx: &mut Context) -> Value {
        match self.body.get() {
            Some(body) => body.evaluate(ctx),
            None => ctx.soft_fail(),
        }
    }
}

impl core::fmt::Debug for Callee<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callee")
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// Calls `callee` with the value of `argument`.
///
/// 1. If the stack has no room for a frame, yield `0` and do nothing else.
/// 2. Evaluate `argument` in the caller's frame, then push it.
/// 3. Run the callee's body.
/// 4. Clear the return flag, pop the frame, yield the body's result.
pub struct Call<'a, F: ?Sized, A> {
    pub callee: &'a F,
    pub argument: A,
}

impl<'a, F: ?Sized, A> Call<'a, F, A> {
    pub const fn new(callee: &'a F, argument: A) -> Self {
        Self { callee, argument }
    }
}

impl<F: Callable + ?Sized, A: Compute> Compute for Call<'_, F, A> {
    #[inline(always)]
    fn compute(&self, ctx: &mut Context) -> Value {
        if ctx.is_frame_limit_reached() {
            return ctx.soft_fail();
        }
        let argument = self.argument.compute(ctx);
        ctx.push(argument);
        let result = self.callee.run_body(ctx);
        ctx.finish_frame();
        result
    }
}

impl<F: ?Sized, A: Clone> Clone for Call<'_, F, A> {
    fn clone(&self) -> Self {
        Self {
            callee: self.callee,
            argument: self.argument.clone(),
        }
    }
}

impl<F: ?Sized, A: Copy> Copy for Call<'_, F, A> {}

/// Evaluates `callee(argument)` as a top-level call.
pub fn invoke<F: Callable + ?Sized>(callee: &F, argument: Value, ctx: &mut Context) -> Value {
    Call::new(callee, Const::new(argument)).compute(ctx)
}

static_assertions::assert_not_impl_any!(Function<'static>: Sync);
static_assertions::assert_not_impl_any!(Callee<'static>: Sync);
