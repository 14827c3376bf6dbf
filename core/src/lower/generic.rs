//! One-to-one lowering into the generic tier.

use bumpalo::Bump;

use crate::{
    api::BuildError,
    expr::{BinaryOp, Expr, FunctionDef},
    node::{Add, Arg, Block, Call, Const, Function, If, IfElse, Less, NodeRef, Return, Sub},
};

/// Lowers `def` into a [`Function`] whose calls refer back to itself.
pub fn lower<'a>(arena: &'a Bump, def: &FunctionDef<'a>) -> Result<&'a Function<'a>, BuildError> {
    if def.body.is_empty() {
        return Err(BuildError::EmptyBody);
    }

    let function: &'a Function<'a> = arena.alloc(Function::new());
    let lowering = GenericLowering { arena, function };
    function.define(lowering.statements(def.body))?;

    tracing::debug!(
        statements = def.body.len(),
        description_nodes = def.size(),
        "lowered function to generic tier"
    );
    Ok(function)
}

struct GenericLowering<'a> {
    arena: &'a Bump,
    function: &'a Function<'a>,
}

impl<'a> GenericLowering<'a> {
    fn statements(&self, statements: &'a [&'a Expr<'a>]) -> &'a [NodeRef<'a>] {
        self.arena
            .alloc_slice_fill_iter(statements.iter().map(|&statement| self.expr(statement)))
    }

    fn expr(&self, expr: &'a Expr<'a>) -> NodeRef<'a> {
        match *expr {
            Expr::Const(value) => self.arena.alloc(Const::new(value)),
            Expr::Arg => self.arena.alloc(Arg),
            Expr::Binary { op, lhs, rhs } => {
                let (lhs, rhs) = (self.expr(lhs), self.expr(rhs));
                match op {
                    BinaryOp::Add => self.arena.alloc(Add::new(lhs, rhs)),
                    BinaryOp::Sub => self.arena.alloc(Sub::new(lhs, rhs)),
                    BinaryOp::Less => self.arena.alloc(Less::new(lhs, rhs)),
                }
            }
            Expr::If { condition, body } => {
                self.arena.alloc(If::new(self.expr(condition), self.expr(body)))
            }
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => self.arena.alloc(IfElse::new(
                self.expr(condition),
                self.expr(then_branch),
                self.expr(else_branch),
            )),
            Expr::Return(value) => self.arena.alloc(Return::new(self.expr(value))),
            Expr::Block(statements) => self.arena.alloc(Block::new(self.statements(statements))),
            Expr::Call(argument) => {
                self.arena.alloc(Call::new(self.function, self.expr(argument)))
            }
        }
    }
}
