//! Tests for grounded operations.

use smallvec::smallvec;

use super::*;
use crate::backend::frame::Args;
use crate::backend::nodes::{app, arg, call, captured, if_, int_lit, lam};
use crate::backend::root::RootBuilder;

fn invoke(name: &str, args: Args) -> EvalResult<Value> {
    let registry = BuiltinRegistry::with_standard_ops();
    registry.get(name).unwrap().call(args)
}

#[test]
fn test_add_op() {
    let result = invoke("+", smallvec![Value::Int(2), Value::Int(3)]).unwrap();
    assert_eq!(result, Value::Int(5));
}

#[test]
fn test_add_overflow() {
    let err = invoke("+", smallvec![Value::Int(i64::MAX), Value::Int(1)]).unwrap_err();
    assert!(matches!(err, EvalError::Arithmetic(ref msg) if msg.contains("overflow")));
}

#[test]
fn test_sub_and_mul() {
    assert_eq!(
        invoke("-", smallvec![Value::Int(2), Value::Int(5)]).unwrap(),
        Value::Int(-3)
    );
    assert_eq!(
        invoke("*", smallvec![Value::Int(6), Value::Int(7)]).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn test_division_by_zero() {
    let err = invoke("/", smallvec![Value::Int(1), Value::Int(0)]).unwrap_err();
    assert_eq!(err, EvalError::Arithmetic("Division by zero".to_string()));

    let err = invoke("%", smallvec![Value::Int(1), Value::Int(0)]).unwrap_err();
    assert_eq!(err, EvalError::Arithmetic("Modulo by zero".to_string()));
}

#[test]
fn test_remainder_overflow() {
    let err = invoke("%", smallvec![Value::Int(i64::MIN), Value::Int(-1)]).unwrap_err();
    assert!(matches!(err, EvalError::Arithmetic(_)));
}

#[test]
fn test_comparison() {
    assert_eq!(
        invoke("<", smallvec![Value::Int(2), Value::Int(3)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke("<=", smallvec![Value::Int(3), Value::Int(3)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke("==", smallvec![Value::Int(3), Value::Bool(true)]).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_type_error_names_bad_operand() {
    let err = invoke("+", smallvec![Value::Int(1), Value::Bool(true)]).unwrap_err();
    assert_eq!(
        err,
        EvalError::TypeError {
            expected: "Int",
            got: "Bool"
        }
    );
}

#[test]
fn test_wrong_arity_is_rejected_by_call_mechanism() {
    let err = invoke("+", smallvec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, EvalError::Arity { expected: 2, got: 1, .. }));
}

#[test]
fn test_specialized_read_through_builtin_body() {
    let registry = BuiltinRegistry::with_standard_ops();
    let le = registry.get("<=").unwrap();
    let body = le.body().unwrap();
    let mut frame = crate::backend::frame::Frame::new(
        smallvec![Value::Int(1), Value::Int(2)],
        0,
        None,
    );
    assert!(body.execute_bool(&mut frame).unwrap());
    assert!(matches!(
        body.execute_integer(&mut frame),
        Err(SlowPath::Unexpected(Value::Bool(true)))
    ));
}

#[test]
fn test_fix_factorial() {
    let registry = BuiltinRegistry::with_standard_ops();
    let le = registry.require("<=").unwrap();
    let mult = registry.require("*").unwrap();
    let minus = registry.require("-").unwrap();
    let fix = registry.require("fix").unwrap();

    // step self n = if n <= 0 then 1 else n * self (n - 1)
    let step = RootBuilder::new("fact-step", 2)
        .build(if_(
            call(&le, vec![arg(1), int_lit(0)]),
            int_lit(1),
            call(
                &mult,
                vec![
                    arg(1),
                    app(arg(0), vec![call(&minus, vec![arg(1), int_lit(1)])]),
                ],
            ),
        ))
        .unwrap();

    let fact = RootBuilder::new("fact", 1)
        .build(call(&fix, vec![lam(&step, vec![]), arg(0)]))
        .unwrap();

    assert_eq!(fact.call(smallvec![Value::Int(10)]).unwrap(), Value::Int(3_628_800));
}

#[test]
fn test_print_id_returns_argument() {
    assert_eq!(invoke("print-id", smallvec![Value::Int(7)]).unwrap(), Value::Int(7));
}

#[test]
fn test_builtin_closure_over_captured_value() {
    let registry = BuiltinRegistry::with_standard_ops();
    let plus = registry.require("+").unwrap();

    // adder k = \x -> k + x
    let add_k = RootBuilder::new("add-k", 1)
        .build(call(&plus, vec![captured(0), arg(0)]))
        .unwrap();
    let adder = RootBuilder::new("adder", 1)
        .build(lam(&add_k, vec![arg(0)]))
        .unwrap();

    let add_ten = adder.call(smallvec![Value::Int(10)]).unwrap();
    let add_ten = crate::backend::call::Callee::from_value(add_ten).unwrap();
    let result = crate::backend::call::IndirectCallSite::new()
        .call(&add_ten, smallvec![Value::Int(5)])
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(result, Value::Int(15));
}

#[test]
fn test_registry_lookup() {
    let registry = BuiltinRegistry::default();
    assert!(registry.get("fix").is_some());
    assert!(registry.get("missing").is_none());
    assert!(registry.require("missing").is_err());
    assert_eq!(registry.names().count(), 10);
}

#[test]
fn test_builtin_target_is_defined_once() {
    let target = builtin_target(Arc::new(AddOp));
    assert!(target.is_defined());
    assert_eq!(target.name(), "+");
    assert_eq!(target.arity(), 2);

    let err = target.define_raw(int_lit(0)).unwrap_err();
    assert_eq!(err, EvalError::Redefinition("+".to_string()));
    assert_eq!(
        target.call(smallvec![Value::Int(1), Value::Int(2)]).unwrap(),
        Value::Int(3)
    );
}
