//! The fusion pass.
//!
//! Rules, tried top-down with the first match winning:
//!
//! | Shape                                   | Becomes                                        |
//! |-----------------------------------------|------------------------------------------------|
//! | `Arg op Const`                          | `ArgAddConst` / `ArgSubConst` / `ArgLessConst` |
//! | `Call(Arg - c)`                         | `Call<Callee, ArgSubConst>`                    |
//! | `Call(Arg - a) op Call(Arg - b)`        | `op<Call<..>, Call<..>>`, no dynamic edges     |
//! | `IfElse(Arg < c, t, e)`                 | `IfElse<ArgLessConst, ..>`, `t`/`e` typed when they match above |
//! | `If(Arg < c, b)`                        | `If<ArgLessConst, NodeRef>`                    |
//! | body `[If(c, Return(t))*, Return(e)]`   | nested `IfElse(c, t, ..e)`, no `Return` nodes  |
//!
//! The body rule needs every guard condition, guard value and the tail to be
//! return-free. A nested `Return` leaves the flag set where the statement list
//! would observe it: inside a condition it ends the function even when the
//! condition is false, and inside a call argument it leaks into the callee's
//! first statement boundary.
//!
//! Unmatched shapes lower to the generic node with fused children. The body
//! rule also only applies to the function's top-level statement list: inside a
//! nested block a `Return` must still reach the enclosing call.

use bumpalo::Bump;

use crate::{
    api::BuildError,
    expr::{BinaryOp, Expr, FunctionDef},
    node::{
        Add, Arg, ArgAddConst, ArgLessConst, ArgSubConst, Block, Call, Callee, Compute, Const, If,
        IfElse, Less, NodeRef, Return, Sub,
    },
    value::Value,
    Vec,
};

/// A self-call whose argument is `Arg - c`.
type CallArgSubConst<'a> = Call<'a, Callee<'a>, ArgSubConst>;

/// How many times each rewrite fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FusionStats {
    pub arg_const: usize,
    pub call_arg_const: usize,
    pub call_pairs: usize,
    pub conditionals: usize,
    pub elided_returns: usize,
}

impl FusionStats {
    pub fn total(&self) -> usize {
        self.arg_const
            + self.call_arg_const
            + self.call_pairs
            + self.conditionals
            + self.elided_returns
    }
}

/// Lowers `def` into a [`Callee`] whose single body node is the fused tree.
pub fn lower<'a>(
    arena: &'a Bump,
    def: &FunctionDef<'a>,
) -> Result<(&'a Callee<'a>, FusionStats), BuildError> {
    if def.body.is_empty() {
        return Err(BuildError::EmptyBody);
    }

    let callee: &'a Callee<'a> = arena.alloc(Callee::new());
    let mut lowering = FusedLowering {
        arena,
        callee,
        stats: FusionStats::default(),
    };
    let body = lowering.body(def.body);
    callee.define(body)?;

    tracing::debug!(
        statements = def.body.len(),
        description_nodes = def.size(),
        rewrites = lowering.stats.total(),
        stats = ?lowering.stats,
        "lowered function to fused tier"
    );
    Ok((callee, lowering.stats))
}

struct FusedLowering<'a> {
    arena: &'a Bump,
    callee: &'a Callee<'a>,
    stats: FusionStats,
}

impl<'a> FusedLowering<'a> {
    fn node<N: Compute + 'a>(&self, node: N) -> NodeRef<'a> {
        self.arena.alloc(node)
    }

    /// Top-level body: a chain of guarded returns ending in a return becomes
    /// one value-producing conditional.
    fn body(&mut self, statements: &'a [&'a Expr<'a>]) -> NodeRef<'a> {
        if let Some((last, guards)) = statements.split_last() {
            if let Expr::Return(tail) = **last {
                let guarded: Option<Vec<(&'a Expr<'a>, &'a Expr<'a>)>> = guards
                    .iter()
                    .map(|statement| match **statement {
                        Expr::If {
                            condition,
                            body: Expr::Return(value),
                        } if !condition.contains_return() && !value.contains_return() => {
                            Some((condition, *value))
                        }
                        _ => None,
                    })
                    .collect::<Option<_>>()
                    .filter(|_| !tail.contains_return());
                if let Some(guarded) = guarded {
                    self.stats.elided_returns += statements.len();
                    return self.guard_chain(&guarded, tail);
                }
            }
        }
        let statements = self.statements(statements);
        self.node(Block::new(statements))
    }

    fn guard_chain(
        &mut self,
        guards: &[(&'a Expr<'a>, &'a Expr<'a>)],
        tail: &'a Expr<'a>,
    ) -> NodeRef<'a> {
        let mut chain = tail;
        for &(condition, then_branch) in guards.iter().rev() {
            chain = self.arena.alloc(Expr::IfElse {
                condition,
                then_branch,
                else_branch: chain,
            });
        }
        self.expr(chain)
    }

    fn statements(&mut self, statements: &'a [&'a Expr<'a>]) -> &'a [NodeRef<'a>] {
        let arena = self.arena;
        arena.alloc_slice_fill_iter(statements.iter().map(|&statement| self.expr(statement)))
    }

    fn expr(&mut self, expr: &'a Expr<'a>) -> NodeRef<'a> {
        match *expr {
            Expr::Const(value) => self.node(Const::new(value)),
            Expr::Arg => self.node(Arg),
            Expr::Binary { op, lhs, rhs } => self.binary(expr, op, lhs, rhs),
            Expr::If { condition, body } => {
                let body = self.expr(body);
                match condition.as_arg_op_const(BinaryOp::Less) {
                    Some(limit) => {
                        self.stats.conditionals += 1;
                        self.stats.arg_const += 1;
                        self.node(If::new(ArgLessConst::new(limit), body))
                    }
                    None => {
                        let condition = self.expr(condition);
                        self.node(If::new(condition, body))
                    }
                }
            }
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => self.if_else(condition, then_branch, else_branch),
            Expr::Return(value) => {
                let value = self.expr(value);
                self.node(Return::new(value))
            }
            Expr::Block(statements) => {
                let statements = self.statements(statements);
                self.node(Block::new(statements))
            }
            Expr::Call(argument) => match argument.as_arg_op_const(BinaryOp::Sub) {
                Some(offset) => {
                    let call = self.call_arg_sub_const(offset);
                    self.node(call)
                }
                None => {
                    let argument = self.expr(argument);
                    self.node(Call::new(self.callee, argument))
                }
            },
        }
    }

    fn call_arg_sub_const(&mut self, offset: Value) -> CallArgSubConst<'a> {
        self.stats.call_arg_const += 1;
        self.stats.arg_const += 1;
        Call::new(self.callee, ArgSubConst::new(offset))
    }

    /// Both operands as typed calls when the shape is `Call(Arg - a) op Call(Arg - b)`.
    fn call_pair(
        &mut self,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    ) -> Option<(CallArgSubConst<'a>, CallArgSubConst<'a>)> {
        let (a, b) = (lhs.as_call_arg_sub_const()?, rhs.as_call_arg_sub_const()?);
        self.stats.call_pairs += 1;
        Some((self.call_arg_sub_const(a), self.call_arg_sub_const(b)))
    }

    fn binary(
        &mut self,
        expr: &'a Expr<'a>,
        op: BinaryOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    ) -> NodeRef<'a> {
        if let Some(constant) = expr.as_arg_op_const(op) {
            self.stats.arg_const += 1;
            return match op {
                BinaryOp::Add => self.node(ArgAddConst::new(constant)),
                BinaryOp::Sub => self.node(ArgSubConst::new(constant)),
                BinaryOp::Less => self.node(ArgLessConst::new(constant)),
            };
        }
        if let Some((lhs, rhs)) = self.call_pair(lhs, rhs) {
            return self.typed_binary(op, lhs, rhs);
        }
        let (lhs, rhs) = (self.expr(lhs), self.expr(rhs));
        self.typed_binary(op, lhs, rhs)
    }

    fn typed_binary<L: Compute + 'a, R: Compute + 'a>(
        &self,
        op: BinaryOp,
        lhs: L,
        rhs: R,
    ) -> NodeRef<'a> {
        match op {
            BinaryOp::Add => self.node(Add::new(lhs, rhs)),
            BinaryOp::Sub => self.node(Sub::new(lhs, rhs)),
            BinaryOp::Less => self.node(Less::new(lhs, rhs)),
        }
    }

    fn if_else(
        &mut self,
        condition: &'a Expr<'a>,
        then_branch: &'a Expr<'a>,
        else_branch: &'a Expr<'a>,
    ) -> NodeRef<'a> {
        let Some(limit) = condition.as_arg_op_const(BinaryOp::Less) else {
            let condition = self.expr(condition);
            let then_branch = self.expr(then_branch);
            let else_branch = self.expr(else_branch);
            return self.node(IfElse::new(condition, then_branch, else_branch));
        };
        self.stats.conditionals += 1;
        self.stats.arg_const += 1;
        let condition = ArgLessConst::new(limit);
        match *then_branch {
            Expr::Arg => self.typed_else(condition, Arg, else_branch),
            _ => {
                let then_branch = self.expr(then_branch);
                self.typed_else(condition, then_branch, else_branch)
            }
        }
    }

    /// Finishes an `IfElse` with a fused condition, typing the else branch
    /// when it is a call pair.
    fn typed_else<T: Compute + 'a>(
        &mut self,
        condition: ArgLessConst,
        then_branch: T,
        else_branch: &'a Expr<'a>,
    ) -> NodeRef<'a> {
        if let Expr::Binary { op, lhs, rhs } = *else_branch {
            if let Some((lhs, rhs)) = self.call_pair(lhs, rhs) {
                return match op {
                    BinaryOp::Add => {
                        self.node(IfElse::new(condition, then_branch, Add::new(lhs, rhs)))
                    }
                    BinaryOp::Sub => {
                        self.node(IfElse::new(condition, then_branch, Sub::new(lhs, rhs)))
                    }
                    BinaryOp::Less => {
                        self.node(IfElse::new(condition, then_branch, Less::new(lhs, rhs)))
                    }
                };
            }
        }
        let else_branch = self.expr(else_branch);
        self.node(IfElse::new(condition, then_branch, else_branch))
    }
}
