//! Per-evaluation execution state.
//!
//! A [`Context`] holds the bounded argument stack and the return-signaling
//! state that replaces host-level early returns. One context belongs to one
//! evaluation at a time; it is `Send` but every mutating operation takes
//! `&mut self`, so it can never be shared by concurrent evaluations.
//!
//! Two conditions are handled softly instead of failing:
//!
//! - pushing when the stack is full,
//! - reading the argument when no frame is active.
//!
//! Both yield [`DEFAULT_VALUE`] and bump a soft-failure counter that the
//! driver inspects after the run (see `OverflowPolicy`).

use crate::Box;
use crate::value::{DEFAULT_VALUE, Value};
use alloc::vec;

/// Default capacity of the argument stack.
pub const DEFAULT_STACK_SIZE: usize = 1024;

/// Argument stack plus return-pending flag and return-value slot.
pub struct Context {
    stack: Box<[Value]>,
    /// Number of occupied slots. Invariant: `top <= stack.len()`.
    top: usize,
    returning: bool,
    /// Only meaningful while `returning` is set.
    return_value: Value,
    soft_failures: usize,
}

impl Context {
    /// Creates a context with a zero-initialized stack of `stack_size` slots.
    ///
    /// A call needs one free slot beyond its own frame, so at most
    /// `stack_size - 1` calls can be active at the same time.
    pub fn new(stack_size: usize) -> Self {
        Self {
            stack: vec![DEFAULT_VALUE; stack_size].into_boxed_slice(),
            top: 0,
            returning: false,
            return_value: DEFAULT_VALUE,
            soft_failures: 0,
        }
    }

    /// Capacity of the argument stack.
    #[inline]
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Number of active call frames.
    #[inline]
    pub fn stack_top(&self) -> usize {
        self.top
    }

    /// Whether a `return` is propagating to the nearest enclosing call.
    #[inline(always)]
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// Number of soft failures recorded since creation or the last
    /// [`take_soft_failures`](Self::take_soft_failures).
    #[inline]
    pub fn soft_failures(&self) -> usize {
        self.soft_failures
    }

    /// Returns the soft-failure count and resets it to zero.
    pub fn take_soft_failures(&mut self) -> usize {
        core::mem::take(&mut self.soft_failures)
    }

    /// Call entry guard: `true` when the stack has no room for another frame.
    #[inline(always)]
    pub fn is_frame_limit_reached(&self) -> bool {
        self.top + 1 >= self.stack.len()
    }

    /// Pushes an argument frame. At capacity this is a no-op that records a
    /// soft failure and returns `false`.
    #[inline(always)]
    pub fn push(&mut self, value: Value) -> bool {
        match self.stack.get_mut(self.top) {
            Some(slot) => {
                *slot = value;
                self.top += 1;
                true
            }
            None => {
                self.soft_fail();
                false
            }
        }
    }

    /// Pops the innermost frame.
    #[inline(always)]
    pub fn pop(&mut self) {
        debug_assert!(self.top > 0, "pop on an empty argument stack");
        self.top = self.top.saturating_sub(1);
    }

    /// Argument of the innermost active frame, or [`DEFAULT_VALUE`] when no
    /// frame is active.
    #[inline(always)]
    pub fn arg(&mut self) -> Value {
        match self.top.checked_sub(1).and_then(|index| self.stack.get(index)) {
            Some(value) => *value,
            None => self.soft_fail(),
        }
    }

    /// Stores `value` and marks it as pending for the nearest enclosing call.
    #[inline(always)]
    pub fn signal_return(&mut self, value: Value) {
        self.return_value = value;
        self.returning = true;
    }

    /// The pending return value, or [`DEFAULT_VALUE`] if nothing returned.
    #[inline(always)]
    pub fn pending_return(&self) -> Value {
        if self.returning {
            self.return_value
        } else {
            DEFAULT_VALUE
        }
    }

    /// Call exit: clears the return flag and pops the frame.
    #[inline(always)]
    pub fn finish_frame(&mut self) {
        self.returning = false;
        self.pop();
    }

    /// Records a soft failure and produces the value to continue with.
    #[cold]
    #[inline(never)]
    pub fn soft_fail(&mut self) -> Value {
        self.soft_failures += 1;
        DEFAULT_VALUE
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}

impl core::fmt::Debug for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("stack", &&self.stack[..self.top])
            .field("stack_size", &self.stack.len())
            .field("returning", &self.returning)
            .field("return_value", &self.return_value)
            .field("soft_failures", &self.soft_failures)
            .finish()
    }
}

static_assertions::assert_impl_all!(Context: Send);
