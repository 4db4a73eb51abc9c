//! Bundled demo programs, built directly as node trees.
//!
//! Used by the command line driver, the integration tests and the benches.
//! Every builder takes a `tail_calls` switch so the same program can be run
//! with and without tail annotation.

use crate::backend::eval::EvalResult;
use crate::backend::grounded::BuiltinRegistry;
use crate::backend::nodes::{app, arg, bool_lit, call, if_, int_lit, lam, let_, var};
use crate::backend::root::{CallTarget, FrameDescriptor, RootBuilder, RootNode};

/// Names accepted by `build`
pub const PROGRAMS: &[&str] = &["even", "odd", "countdown", "sum", "add", "fact"];

/// Build the program called `name`, returning its unary or binary entry
/// point, or `None` for an unknown name.
pub fn build(name: &str, registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<Option<CallTarget>> {
    let target = match name {
        "even" => even_odd(registry, tail_calls)?.0,
        "odd" => even_odd(registry, tail_calls)?.1,
        "countdown" => countdown(registry, tail_calls)?,
        "sum" => sum_to(registry, tail_calls)?,
        "add" => add(registry, tail_calls)?,
        "fact" => factorial(registry, tail_calls)?,
        _ => return Ok(None),
    };
    Ok(Some(target))
}

/// Mutual recursion:
///
/// is-even 0 = true;  is-even n = is-odd (n - 1)
/// is-odd 0 = false;  is-odd n = is-even (n - 1)
pub fn even_odd(registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<(CallTarget, CallTarget)> {
    let eq = registry.require("==")?;
    let minus = registry.require("-")?;

    let is_even = RootNode::declare("is-even", 1, FrameDescriptor::default());
    let is_odd = RootNode::declare("is-odd", 1, FrameDescriptor::default());

    is_even.define(
        if_(
            call(&eq, vec![arg(0), int_lit(0)]),
            bool_lit(true),
            call(&is_odd, vec![call(&minus, vec![arg(0), int_lit(1)])]),
        ),
        tail_calls,
    )?;
    is_odd.define(
        if_(
            call(&eq, vec![arg(0), int_lit(0)]),
            bool_lit(false),
            call(&is_even, vec![call(&minus, vec![arg(0), int_lit(1)])]),
        ),
        tail_calls,
    )?;

    Ok((is_even, is_odd))
}

/// Self recursion down to zero: countdown n = if n <= 0 then 0 else countdown (n - 1)
pub fn countdown(registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<CallTarget> {
    let le = registry.require("<=")?;
    let minus = registry.require("-")?;

    let target = RootNode::declare("countdown", 1, FrameDescriptor::default());
    target.define(
        if_(
            call(&le, vec![arg(0), int_lit(0)]),
            int_lit(0),
            call(&target, vec![call(&minus, vec![arg(0), int_lit(1)])]),
        ),
        tail_calls,
    )?;
    Ok(target)
}

/// Accumulating loop through a local slot:
///
/// sum n = loop n 0
/// loop n acc = if n <= 0 then acc else let next = acc + n in loop (n - 1) next
pub fn sum_to(registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<CallTarget> {
    let le = registry.require("<=")?;
    let minus = registry.require("-")?;
    let plus = registry.require("+")?;

    let sum_loop = RootNode::declare("sum-loop", 2, FrameDescriptor::with_locals(1));
    sum_loop.define(
        if_(
            call(&le, vec![arg(0), int_lit(0)]),
            arg(1),
            let_(
                0,
                call(&plus, vec![arg(1), arg(0)]),
                call(&sum_loop, vec![call(&minus, vec![arg(0), int_lit(1)]), var(0)]),
            ),
        ),
        tail_calls,
    )?;

    RootBuilder::new("sum", 1)
        .tail_calls(tail_calls)
        .build(call(&sum_loop, vec![arg(0), int_lit(0)]))
}

/// add x y = x + y, the primitive applied in tail position
pub fn add(registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<CallTarget> {
    let plus = registry.require("+")?;
    RootBuilder::new("add", 2)
        .tail_calls(tail_calls)
        .build(call(&plus, vec![arg(0), arg(1)]))
}

/// Factorial through the fixed-point builtin:
///
/// fact n = fix step n
/// step self n = if n <= 0 then 1 else n * self (n - 1)
///
/// The recursive call is an argument of `*`, so it is never a tail call and
/// nesting grows with `n`.
pub fn factorial(registry: &BuiltinRegistry, tail_calls: bool) -> EvalResult<CallTarget> {
    let le = registry.require("<=")?;
    let minus = registry.require("-")?;
    let mult = registry.require("*")?;
    let fix = registry.require("fix")?;

    let step = RootBuilder::new("fact-step", 2).tail_calls(tail_calls).build(if_(
        call(&le, vec![arg(1), int_lit(0)]),
        int_lit(1),
        call(
            &mult,
            vec![
                arg(1),
                app(arg(0), vec![call(&minus, vec![arg(1), int_lit(1)])]),
            ],
        ),
    ))?;

    RootBuilder::new("fact", 1)
        .tail_calls(tail_calls)
        .build(call(&fix, vec![lam(&step, vec![]), arg(0)]))
}
