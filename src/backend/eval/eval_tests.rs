use std::sync::{Arc, Mutex};

use smallvec::smallvec;

use super::*;
use crate::backend::call::Callee;
use crate::backend::frame::{Args, Frame};
use crate::backend::models::Closure;
use crate::backend::nodes::{arg, bool_lit, call, captured, if_, int_lit, lam, let_, var};
use crate::backend::root::{CallTarget, RootBuilder};
use crate::backend::runtime::Runtime;

/// Records its id in a shared log every time it runs
#[derive(Debug)]
struct Recorder {
    id: usize,
    value: Value,
    log: Arc<Mutex<Vec<usize>>>,
}

impl Expr for Recorder {
    fn execute(&self, _frame: &mut Frame) -> ExecResult {
        self.log.lock().unwrap().push(self.id);
        Ok(Completion::Value(self.value.clone()))
    }
}

fn record(id: usize, log: &Arc<Mutex<Vec<usize>>>) -> Box<dyn Expr> {
    Box::new(Recorder {
        id,
        value: Value::Int(id as i64),
        log: Arc::clone(log),
    })
}

/// (three a b c) = c
fn third() -> CallTarget {
    RootBuilder::new("third", 3).build(arg(2)).unwrap()
}

fn tail_call_of(completion: Completion) -> TailCall {
    match completion {
        Completion::TailCall(call) => call,
        other => panic!("expected a tail call, got {:?}", other),
    }
}

#[test]
fn test_app_outside_tail_position_calls_immediately() {
    let target = third();
    let node = App::direct(target, vec![int_lit(1), int_lit(2), int_lit(3)]);
    assert!(!node.is_tail());

    let completion = node.execute(&mut Frame::empty()).unwrap();
    assert!(!completion.is_tail_call());
    assert_eq!(completion.into_value().unwrap(), Value::Int(3));
}

#[test]
fn test_app_in_tail_position_returns_pending_call() {
    let target = third();
    let mut node = App::direct(Arc::clone(&target), vec![int_lit(1), int_lit(2), int_lit(3)]);
    assert!(node.mark_tail());
    assert!(node.is_tail());

    let call = tail_call_of(node.execute(&mut Frame::empty()).unwrap());
    assert_eq!(call.callee.name(), "third");
    assert_eq!(call.args.as_slice(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_mark_tail_is_idempotent() {
    let mut node = App::direct(third(), vec![int_lit(1), int_lit(2), int_lit(3)]);
    assert!(node.mark_tail());
    let first = tail_call_of(node.execute(&mut Frame::empty()).unwrap());

    assert!(node.mark_tail());
    assert!(node.is_tail());
    let second = tail_call_of(node.execute(&mut Frame::empty()).unwrap());

    assert_eq!(first.callee.name(), second.callee.name());
    assert_eq!(first.args, second.args);
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let node = App::direct(third(), vec![record(1, &log), record(2, &log), record(3, &log)]);

    let value = node.execute(&mut Frame::empty()).unwrap().into_value().unwrap();
    assert_eq!(value, Value::Int(3));
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_arguments_evaluate_left_to_right_in_tail_position() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut node = App::direct(third(), vec![record(1, &log), record(2, &log), record(3, &log)]);
    node.mark_tail();

    let call = tail_call_of(node.execute(&mut Frame::empty()).unwrap());
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(call.args.as_slice(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_operator_evaluates_before_arguments() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let target = third();
    let rator = Box::new(Recorder {
        id: 0,
        value: Value::Closure(Arc::new(Closure::new(target, None))),
        log: Arc::clone(&log),
    });
    let node = App::indirect(rator, vec![record(1, &log), record(2, &log), record(3, &log)]);

    let value = node.execute(&mut Frame::empty()).unwrap().into_value().unwrap();
    assert_eq!(value, Value::Int(3));
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn test_argument_error_stops_evaluation() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let node = App::direct(third(), vec![record(1, &log), arg(7), record(3, &log)]);

    let err = node.execute(&mut Frame::empty()).unwrap_err();
    assert!(matches!(err, EvalError::InvalidSlot { kind: "argument", index: 7, .. }));
    assert_eq!(*log.lock().unwrap(), vec![1]);
}

#[test]
fn test_calling_a_non_closure_fails() {
    let node = App::indirect(int_lit(5), vec![]);
    let err = node.execute(&mut Frame::empty()).unwrap_err();
    assert_eq!(err, EvalError::NotCallable { got: "Int" });
}

#[test]
fn test_escaped_tail_call_is_an_error() {
    let mut node = App::direct(third(), vec![int_lit(1), int_lit(2), int_lit(3)]);
    node.mark_tail();

    let err = Runtime::default().eval(&node).unwrap_err();
    assert_eq!(
        err,
        EvalError::EscapedTailCall {
            callee: "third".to_string()
        }
    );
}

#[test]
fn test_trampoline_settles_marked_application() {
    let mut node = App::direct(third(), vec![int_lit(1), int_lit(2), int_lit(3)]);
    node.mark_tail();
    let tramp = Trampoline::new(Box::new(node));

    let completion = tramp.execute(&mut Frame::empty()).unwrap();
    assert!(!completion.is_tail_call());
    assert_eq!(completion.into_value().unwrap(), Value::Int(3));
}

#[test]
fn test_trampoline_is_not_itself_a_tail_position() {
    let node = App::direct(third(), vec![int_lit(1), int_lit(2), int_lit(3)]);
    let mut tramp = Trampoline::new(Box::new(node));
    assert!(!tramp.mark_tail());
    assert!(format!("{:?}", tramp).contains("is_tail: true"));
}

#[test]
fn test_nullary_call_in_tail_position() {
    let answer = RootBuilder::new("answer", 0).build(int_lit(42)).unwrap();

    let mut node = App::direct(Arc::clone(&answer), vec![]);
    assert_eq!(node.arity(), 0);
    assert!(node.mark_tail());
    let pending = tail_call_of(node.execute(&mut Frame::empty()).unwrap());
    assert_eq!(pending.callee.name(), "answer");
    assert!(pending.args.is_empty());

    let mut body = call(&answer, vec![]);
    assert!(body.mark_tail());
    let tramp = Trampoline::new(body);
    let completion = tramp.execute(&mut Frame::empty()).unwrap();
    assert!(!completion.is_tail_call());
    assert_eq!(completion.into_value().unwrap(), Value::Int(42));

    let wrapper = RootBuilder::new("wrapper", 0)
        .build(call(&answer, vec![]))
        .unwrap();
    assert_eq!(
        format!("{:?}", wrapper.body().unwrap()).matches("Trampoline").count(),
        1
    );
    assert_eq!(wrapper.call(Args::new()).unwrap(), Value::Int(42));
}

#[test]
fn test_if_marks_both_branches() {
    let target = third();
    let mut both = if_(
        bool_lit(true),
        call(&target, vec![int_lit(1), int_lit(2), int_lit(3)]),
        call(&target, vec![int_lit(4), int_lit(5), int_lit(6)]),
    );
    assert!(both.mark_tail());
    let debug = format!("{:?}", both);
    assert_eq!(debug.matches("is_tail: true").count(), 2);

    let mut neither = if_(bool_lit(true), int_lit(1), int_lit(2));
    assert!(!neither.mark_tail());
}

#[test]
fn test_if_condition_is_never_tail() {
    let target = RootBuilder::new("yes", 0).build(bool_lit(true)).unwrap();
    let mut node = if_(call(&target, vec![]), int_lit(1), int_lit(2));
    assert!(!node.mark_tail());
    assert!(format!("{:?}", node).contains("is_tail: false"));
    assert_eq!(
        node.execute_value(&mut Frame::empty()).unwrap(),
        Value::Int(1)
    );
}

#[test]
fn test_if_requires_bool_condition() {
    let node = if_(int_lit(1), int_lit(2), int_lit(3));
    let err = node.execute(&mut Frame::empty()).unwrap_err();
    assert_eq!(
        err,
        EvalError::TypeError {
            expected: "Bool",
            got: "Int"
        }
    );
}

#[test]
fn test_if_evaluates_only_chosen_branch() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let node = if_(bool_lit(false), record(1, &log), record(2, &log));
    assert_eq!(
        node.execute_value(&mut Frame::empty()).unwrap(),
        Value::Int(2)
    );
    assert_eq!(*log.lock().unwrap(), vec![2]);
}

#[test]
fn test_let_binds_local_slot() {
    let node = let_(0, int_lit(5), var(0));
    let mut frame = Frame::new(Args::new(), 1, None);
    assert_eq!(node.execute_value(&mut frame).unwrap(), Value::Int(5));
    assert_eq!(frame.local(0).unwrap(), &Value::Int(5));
}

#[test]
fn test_let_body_inherits_tail_position() {
    let target = third();
    let mut node = let_(
        0,
        call(&target, vec![int_lit(1), int_lit(2), int_lit(3)]),
        call(&target, vec![var(0), var(0), var(0)]),
    );
    assert!(node.mark_tail());

    let debug = format!("{:?}", node);
    assert_eq!(debug.matches("is_tail: true").count(), 1);
    assert_eq!(debug.matches("is_tail: false").count(), 1);
}

#[test]
fn test_let_value_rejects_pending_call() {
    let mut value = App::direct(third(), vec![int_lit(1), int_lit(2), int_lit(3)]);
    value.mark_tail();
    let node = Let::new(0, Box::new(value), var(0));

    let err = node.execute(&mut Frame::new(Args::new(), 1, None)).unwrap_err();
    assert!(matches!(err, EvalError::EscapedTailCall { .. }));
}

#[test]
fn test_lambda_captures_environment() {
    let get = RootBuilder::new("get", 0).build(captured(0)).unwrap();
    let node = lam(&get, vec![arg(0)]);

    let mut frame = Frame::new(smallvec![Value::Int(7)], 0, None);
    let closure = node.execute_value(&mut frame).unwrap();

    let callee = Callee::from_value(closure).unwrap();
    let value = Runtime::default().apply(&callee, Args::new()).unwrap();
    assert_eq!(value, Value::Int(7));
}

#[test]
fn test_lambda_is_never_tail() {
    let target = third();
    let mut node = lam(&target, vec![]);
    assert!(!node.mark_tail());
}

#[test]
fn test_literal_specialized_reads() {
    let mut frame = Frame::empty();
    let n = Literal::new(Value::Int(3));
    assert_eq!(n.execute_integer(&mut frame).unwrap(), 3);
    match n.execute_bool(&mut frame) {
        Err(SlowPath::Unexpected(value)) => assert_eq!(value, Value::Int(3)),
        other => panic!("unexpected {:?}", other),
    }

    let b = Literal::new(Value::Bool(true));
    assert!(b.execute_bool(&mut frame).unwrap());
}

#[test]
fn test_generic_specialized_read_carries_value() {
    let mut frame = Frame::new(smallvec![Value::Bool(false)], 0, None);
    let node = Arg(0);
    match node.execute_integer(&mut frame) {
        Err(slow) => assert_eq!(slow.into_value().unwrap(), Value::Bool(false)),
        Ok(n) => panic!("read {} from a bool", n),
    }
}

#[test]
fn test_invalid_slots() {
    let mut frame = Frame::empty();
    assert!(matches!(
        Var(0).execute(&mut frame),
        Err(EvalError::InvalidSlot { kind: "local", .. })
    ));
    assert!(matches!(
        Captured(0).execute(&mut frame),
        Err(EvalError::InvalidSlot { .. })
    ));
}
