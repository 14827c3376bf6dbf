//! End-to-end evaluation through the public API.

use nodefuse::{
    Bump, Context, DEFAULT_STACK_SIZE, DEFAULT_VALUE, Engine, EngineOptions, EvalError,
    ExprBuilder, FunctionDef, OverflowPolicy, Tier,
};
use pretty_assertions::assert_eq;

const TIERS: [Tier; 2] = [Tier::Generic, Tier::Fused];

/// Evaluation recurses on the host stack; deep runs get a thread with room
/// for a full argument stack even in unoptimized builds.
fn with_large_stack<T: Send>(f: impl FnOnce() -> T + Send) -> T {
    std::thread::scope(|scope| {
        std::thread::Builder::new()
            .stack_size(256 * 1024 * 1024)
            .spawn_scoped(scope, f)
            .unwrap()
            .join()
            .unwrap()
    })
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_fibonacci_end_to_end() {
    for tier in TIERS {
        let arena = Bump::new();
        let engine = Engine::new(&arena, EngineOptions { tier, ..Default::default() });
        let fib = engine.compile(&ExprBuilder::new(&arena).fibonacci()).unwrap();

        assert_eq!(fib.run(10), Ok(55), "{tier:?}");
        assert_eq!(fib.run(0), Ok(0), "{tier:?}");
        assert_eq!(fib.run(1), Ok(1), "{tier:?}");
    }
}

#[test]
fn test_fibonacci_sequence() {
    let arena = Bump::new();
    let fib = Engine::new(&arena, EngineOptions::default())
        .compile(&ExprBuilder::new(&arena).fibonacci())
        .unwrap();
    let mut ctx = fib.new_context();

    let (mut a, mut b) = (0, 1);
    for n in 0..=22 {
        assert_eq!(fib.run_with(&mut ctx, n), Ok(a), "fib({n})");
        (a, b) = (b, a + b);
    }
}

#[test]
fn test_countdown_reaches_full_depth() {
    with_large_stack(|| {
        for tier in TIERS {
            let arena = Bump::new();
            let b = ExprBuilder::new(&arena);
            // if (n < 1) return 0; return f(n - 1) + 1;
            let countdown = FunctionDef::new(b.statements(&[
                b.if_then(b.less(b.arg(), b.int(1)), b.ret(b.int(0))),
                b.ret(b.add(b.call(b.sub(b.arg(), b.int(1))), b.int(1))),
            ]));
            let options = EngineOptions {
                tier,
                overflow: OverflowPolicy::Error,
                ..Default::default()
            };
            let f = Engine::new(&arena, options).compile(&countdown).unwrap();

            // The entry call takes one frame, so `n` needs `n + 1` frames.
            let deepest = DEFAULT_STACK_SIZE as i64 - 2;
            assert_eq!(f.run(deepest), Ok(deepest), "{tier:?}");
            assert!(f.run(deepest + 1).is_err(), "{tier:?}");
        }
    });
}

// ============================================================================
// Stack safety
// ============================================================================

#[test]
fn test_unbounded_recursion_returns_default() {
    with_large_stack(|| {
        for tier in TIERS {
            let arena = Bump::new();
            let b = ExprBuilder::new(&arena);
            let def = FunctionDef::new(b.statements(&[b.ret(b.call(b.sub(b.arg(), b.int(1))))]));
            let f = Engine::new(&arena, EngineOptions { tier, ..Default::default() })
                .compile(&def)
                .unwrap();

            let mut ctx = f.new_context();
            assert_eq!(f.run_with(&mut ctx, 1_000_000), Ok(DEFAULT_VALUE), "{tier:?}");
            assert_eq!(ctx.stack_top(), 0);
            assert!(!ctx.is_returning());
            assert_eq!(ctx.soft_failures(), 1);
        }
    });
}

#[test]
fn test_deep_fibonacci_returns_default() {
    // Fifteen frames never get within reach of a base case from 100, so every
    // leaf of the truncated call tree yields the default.
    for tier in TIERS {
        let arena = Bump::new();
        let options = EngineOptions {
            stack_size: 16,
            tier,
            ..Default::default()
        };
        let fib = Engine::new(&arena, options)
            .compile(&ExprBuilder::new(&arena).fibonacci())
            .unwrap();

        let mut ctx = fib.new_context();
        assert_eq!(fib.run_with(&mut ctx, 100), Ok(DEFAULT_VALUE), "{tier:?}");
        assert_eq!(ctx.stack_top(), 0);

        // Same context, shallow argument: still exact.
        assert_eq!(fib.run_with(&mut ctx, 12), Ok(144), "{tier:?}");
    }
}

#[test]
fn test_error_policy() {
    let arena = Bump::new();
    let options = EngineOptions {
        stack_size: 16,
        overflow: OverflowPolicy::Error,
        ..Default::default()
    };
    let fib = Engine::new(&arena, options)
        .compile(&ExprBuilder::new(&arena).fibonacci())
        .unwrap();

    assert_eq!(fib.run(14), Ok(377));
    match fib.run(100) {
        Err(EvalError::StackExhausted {
            soft_failures,
            stack_size,
        }) => {
            assert!(soft_failures > 0);
            assert_eq!(stack_size, 16);
        }
        other => panic!("expected stack exhaustion, got {other:?}"),
    }
}

// ============================================================================
// Contexts
// ============================================================================

#[test]
fn test_private_context_per_thread() {
    let arena = Bump::new();
    let fib = Engine::new(&arena, EngineOptions::default())
        .compile(&ExprBuilder::new(&arena).fibonacci())
        .unwrap();
    let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610];

    // Trees are not `Sync`; each thread lowers its own and owns its context.
    std::thread::scope(|scope| {
        for worker in 0..4 {
            scope.spawn(move || {
                let arena = Bump::new();
                let fib = Engine::new(&arena, EngineOptions::default())
                    .compile(&ExprBuilder::new(&arena).fibonacci())
                    .unwrap();
                let mut ctx = Context::new(64);
                for n in (worker..16).step_by(4) {
                    assert_eq!(fib.run_with(&mut ctx, n as i64), Ok(expected[n]));
                }
            });
        }
    });

    assert_eq!(fib.run(15), Ok(610));
}
