//! Description of a single-argument function, as handed over by a front end.
//!
//! The description is plain data in an arena. It is not evaluated directly;
//! [`lower`](crate::lower) turns it into a node tree of the requested tier.
//! No validation happens beyond what the lowering needs to allocate nodes.
//!
//! ```ignore
//! let b = ExprBuilder::new(&arena);
//! // if (n < 2) return n; return f(n - 1) + f(n - 2);
//! let fib = FunctionDef::new(b.statements(&[
//!     b.if_then(b.less(b.arg(), b.int(2)), b.ret(b.arg())),
//!     b.ret(b.add(b.call(b.sub(b.arg(), b.int(1))), b.call(b.sub(b.arg(), b.int(2))))),
//! ]));
//! ```

use bumpalo::Bump;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Less,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr<'a> {
    Const(Value),
    /// The current call's argument.
    Arg,
    Binary {
        op: BinaryOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    },
    /// Yields `0`; the body's value is discarded.
    If {
        condition: &'a Expr<'a>,
        body: &'a Expr<'a>,
    },
    IfElse {
        condition: &'a Expr<'a>,
        then_branch: &'a Expr<'a>,
        else_branch: &'a Expr<'a>,
    },
    Return(&'a Expr<'a>),
    Block(&'a [&'a Expr<'a>]),
    /// A call to the function being described.
    Call(&'a Expr<'a>),
}

impl<'a> Expr<'a> {
    /// The constant of an `Arg op Const` shape with the given operator.
    pub fn as_arg_op_const(&self, expected: BinaryOp) -> Option<Value> {
        match *self {
            Expr::Binary {
                op,
                lhs: Expr::Arg,
                rhs: Expr::Const(value),
            } if op == expected => Some(*value),
            _ => None,
        }
    }

    /// The constant `c` of a `Call(Arg - c)` shape.
    pub fn as_call_arg_sub_const(&self) -> Option<Value> {
        match self {
            Expr::Call(argument) => argument.as_arg_op_const(BinaryOp::Sub),
            _ => None,
        }
    }

    /// Whether a `Return` occurs anywhere in this subtree.
    pub fn contains_return(&self) -> bool {
        match self {
            Expr::Const(_) | Expr::Arg => false,
            Expr::Return(_) => true,
            Expr::Binary { lhs, rhs, .. } => lhs.contains_return() || rhs.contains_return(),
            Expr::If { condition, body } => condition.contains_return() || body.contains_return(),
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.contains_return()
                    || then_branch.contains_return()
                    || else_branch.contains_return()
            }
            Expr::Call(argument) => argument.contains_return(),
            Expr::Block(statements) => statements.iter().any(|s| s.contains_return()),
        }
    }

    /// Number of description nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + match self {
            Expr::Const(_) | Expr::Arg => 0,
            Expr::Binary { lhs, rhs, .. } => lhs.size() + rhs.size(),
            Expr::If { condition, body } => condition.size() + body.size(),
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => condition.size() + then_branch.size() + else_branch.size(),
            Expr::Return(value) | Expr::Call(value) => value.size(),
            Expr::Block(statements) => statements.iter().map(|s| s.size()).sum(),
        }
    }
}

/// The body of a single-argument, possibly self-recursive function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDef<'a> {
    pub body: &'a [&'a Expr<'a>],
}

impl<'a> FunctionDef<'a> {
    pub const fn new(body: &'a [&'a Expr<'a>]) -> Self {
        Self { body }
    }

    pub fn size(&self) -> usize {
        self.body.iter().map(|s| s.size()).sum()
    }
}

/// Arena-backed constructors for [`Expr`].
#[derive(Clone, Copy)]
pub struct ExprBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    fn alloc(self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    pub fn int(self, value: Value) -> &'a Expr<'a> {
        self.alloc(Expr::Const(value))
    }

    pub fn arg(self) -> &'a Expr<'a> {
        self.alloc(Expr::Arg)
    }

    pub fn binary(self, op: BinaryOp, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Binary { op, lhs, rhs })
    }

    pub fn add(self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.binary(BinaryOp::Sub, lhs, rhs)
    }

    pub fn less(self, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> &'a Expr<'a> {
        self.binary(BinaryOp::Less, lhs, rhs)
    }

    pub fn if_then(self, condition: &'a Expr<'a>, body: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::If { condition, body })
    }

    pub fn if_else(
        self,
        condition: &'a Expr<'a>,
        then_branch: &'a Expr<'a>,
        else_branch: &'a Expr<'a>,
    ) -> &'a Expr<'a> {
        self.alloc(Expr::IfElse {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn ret(self, value: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Return(value))
    }

    pub fn block(self, statements: &[&'a Expr<'a>]) -> &'a Expr<'a> {
        self.alloc(Expr::Block(self.statements(statements)))
    }

    pub fn call(self, argument: &'a Expr<'a>) -> &'a Expr<'a> {
        self.alloc(Expr::Call(argument))
    }

    /// Copies a statement list into the arena.
    pub fn statements(self, statements: &[&'a Expr<'a>]) -> &'a [&'a Expr<'a>] {
        self.arena.alloc_slice_copy(statements)
    }

    /// `if (n < 2) return n; return f(n - 1) + f(n - 2);`
    pub fn fibonacci(self) -> FunctionDef<'a> {
        let base = self.if_then(self.less(self.arg(), self.int(2)), self.ret(self.arg()));
        let recurse = self.ret(self.add(
            self.call(self.sub(self.arg(), self.int(1))),
            self.call(self.sub(self.arg(), self.int(2))),
        ));
        FunctionDef::new(self.statements(&[base, recurse]))
    }
}
