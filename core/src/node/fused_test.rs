//! Fused nodes against the generic compositions they replace.

use super::*;
use crate::{context::Context, value::Value};
use bumpalo::Bump;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

type FusedCall<'a> = Call<'a, Callee<'a>, ArgSubConst>;
type FusedFibonacci<'a> = IfElse<ArgLessConst, Arg, Add<FusedCall<'a>, FusedCall<'a>>>;

/// `n < 2 ? n : f(n - 1) + f(n - 2)` with no type-erased edge below the root.
fn fused_fibonacci(arena: &Bump) -> &Callee<'_> {
    let callee: &Callee = arena.alloc(Callee::new());
    let body: FusedFibonacci = IfElse::new(
        ArgLessConst::new(2),
        Arg,
        Add::new(
            Call::new(callee, ArgSubConst::new(1)),
            Call::new(callee, ArgSubConst::new(2)),
        ),
    );
    callee.define(arena.alloc(body)).unwrap();
    callee
}

/// The same function built from type-erased nodes only.
fn generic_fibonacci(arena: &Bump) -> &Function<'_> {
    let function: &Function = arena.alloc(Function::new());
    let arg: NodeRef = arena.alloc(Arg);
    let call = |offset| -> NodeRef {
        let offset: NodeRef = arena.alloc(Const::new(offset));
        let argument: NodeRef = arena.alloc(Sub::new(arg, offset));
        arena.alloc(Call::new(function, argument))
    };
    let two: NodeRef = arena.alloc(Const::new(2));
    let condition: NodeRef = arena.alloc(Less::new(arg, two));
    let base: NodeRef = arena.alloc(If::new(condition, arena.alloc(Return::new(arg)) as NodeRef));
    let sum: NodeRef = arena.alloc(Add::new(call(1), call(2)));
    let recurse: NodeRef = arena.alloc(Return::new(sum));
    function.define(arena.alloc_slice_copy(&[base, recurse])).unwrap();
    function
}

fn with_frame(argument: Value) -> Context {
    let mut ctx = Context::new(4);
    ctx.push(argument);
    ctx
}

// ============================================================================
// Leaf shapes
// ============================================================================

proptest! {
    #[test]
    fn test_arg_add_const_matches_composition(arg in any::<Value>(), constant in any::<Value>()) {
        let mut ctx = with_frame(arg);
        let fused = ArgAddConst::new(constant).compute(&mut ctx);
        let generic = Add::new(Arg, Const::new(constant)).compute(&mut ctx);
        prop_assert_eq!(fused, generic);
    }

    #[test]
    fn test_arg_sub_const_matches_composition(arg in any::<Value>(), constant in any::<Value>()) {
        let mut ctx = with_frame(arg);
        let fused = ArgSubConst::new(constant).compute(&mut ctx);
        let generic = Sub::new(Arg, Const::new(constant)).compute(&mut ctx);
        prop_assert_eq!(fused, generic);
    }

    #[test]
    fn test_arg_less_const_matches_composition(arg in any::<Value>(), constant in any::<Value>()) {
        let mut ctx = with_frame(arg);
        let fused = ArgLessConst::new(constant).compute(&mut ctx);
        let generic = Less::new(Arg, Const::new(constant)).compute(&mut ctx);
        prop_assert_eq!(fused, generic);
    }

    #[test]
    fn test_dynamic_dispatch_matches_static(arg in any::<Value>(), constant in any::<Value>()) {
        let mut ctx = with_frame(arg);
        let node = ArgSubConst::new(constant);
        let erased: NodeRef = &node;
        prop_assert_eq!(erased.evaluate(&mut ctx), node.compute(&mut ctx));
        prop_assert_eq!(erased.compute(&mut ctx), node.compute(&mut ctx));
    }
}

#[test]
fn test_fused_leaf_keeps_constant() {
    assert_eq!(ArgSubConst::new(-4).constant(), -4);
    assert_eq!(ArgLessConst::new(2), ArgLessConst::new(2));
}

#[test]
fn test_fused_leaf_without_frame_is_default() {
    let mut ctx = Context::new(4);
    assert_eq!(ArgAddConst::new(3).compute(&mut ctx), 3);
    assert_eq!(ArgLessConst::new(3).compute(&mut ctx), 1);
    assert_eq!(ctx.soft_failures(), 2);
}

// ============================================================================
// Fused recursion
// ============================================================================

#[test]
fn test_fused_fibonacci_matches_generic() {
    let arena = Bump::new();
    let fused = fused_fibonacci(&arena);
    let generic = generic_fibonacci(&arena);
    let mut ctx = Context::new(64);

    for n in 0..20 {
        assert_eq!(invoke(fused, n, &mut ctx), invoke(generic, n, &mut ctx), "n = {n}");
    }
    assert_eq!(invoke(fused, 20, &mut ctx), 6765);
    assert_eq!(ctx.soft_failures(), 0);
}

#[test]
fn test_fused_call_restores_state() {
    let arena = Bump::new();
    let fused = fused_fibonacci(&arena);
    let mut ctx = Context::new(64);
    ctx.push(99);

    let call: FusedCall = Call::new(fused, ArgSubConst::new(90));
    assert_eq!(call.compute(&mut ctx), 34);
    assert_eq!(ctx.stack_top(), 1);
    assert_eq!(ctx.arg(), 99);
    assert!(!ctx.is_returning());
}

#[test]
fn test_fused_and_generic_degrade_identically() {
    let arena = Bump::new();
    let fused = fused_fibonacci(&arena);
    let generic = generic_fibonacci(&arena);

    for stack_size in [0, 1, 2, 5, 9] {
        let (mut fused_ctx, mut generic_ctx) =
            (Context::new(stack_size), Context::new(stack_size));
        for n in [3, 12, 18] {
            assert_eq!(
                invoke(fused, n, &mut fused_ctx),
                invoke(generic, n, &mut generic_ctx),
                "n = {n}, stack_size = {stack_size}"
            );
        }
        assert_eq!(fused_ctx.soft_failures(), generic_ctx.soft_failures());
        assert_eq!(fused_ctx.stack_top(), 0);
        assert_eq!(generic_ctx.stack_top(), 0);
    }
}
