//! Node factory.
//!
//! Short constructors for building node trees by hand or from a compiler
//! front end. Every constructor returns a boxed node ready to be placed in a
//! tree; tail annotation happens later, when a body is defined on a root.
//!
//! ```rust
//! use smallvec::smallvec;
//! use tailwalk::backend::grounded::BuiltinRegistry;
//! use tailwalk::backend::nodes::{arg, call, int_lit};
//! use tailwalk::backend::{RootBuilder, Value};
//!
//! let registry = BuiltinRegistry::with_standard_ops();
//! let plus = registry.get("+").unwrap();
//! let inc = RootBuilder::new("inc", 1)
//!     .build(call(&plus, vec![arg(0), int_lit(1)]))
//!     .unwrap();
//! assert_eq!(inc.call(smallvec![Value::Int(41)]).unwrap(), Value::Int(42));
//! ```

use std::sync::Arc;

use crate::backend::eval::{App, Arg, Captured, Expr, If, Lambda, Let, Literal, Trampoline, Var};
use crate::backend::models::Value;
use crate::backend::root::CallTarget;

pub fn arg(index: usize) -> Box<dyn Expr> {
    Box::new(Arg(index))
}

pub fn var(slot: usize) -> Box<dyn Expr> {
    Box::new(Var(slot))
}

pub fn captured(index: usize) -> Box<dyn Expr> {
    Box::new(Captured(index))
}

pub fn lit(value: Value) -> Box<dyn Expr> {
    Box::new(Literal::new(value))
}

pub fn bool_lit(b: bool) -> Box<dyn Expr> {
    lit(Value::Bool(b))
}

pub fn int_lit(n: i64) -> Box<dyn Expr> {
    lit(Value::Int(n))
}

pub fn unit() -> Box<dyn Expr> {
    lit(Value::Unit)
}

/// Closure over `target` capturing the values of `captures`
pub fn lam(target: &CallTarget, captures: Vec<Box<dyn Expr>>) -> Box<dyn Expr> {
    Box::new(Lambda::new(Arc::clone(target), captures))
}

/// Application of whatever `rator` evaluates to
pub fn app(rator: Box<dyn Expr>, rands: Vec<Box<dyn Expr>>) -> Box<dyn Expr> {
    Box::new(App::indirect(rator, rands))
}

/// Application of a statically known target
pub fn call(target: &CallTarget, rands: Vec<Box<dyn Expr>>) -> Box<dyn Expr> {
    Box::new(App::direct(Arc::clone(target), rands))
}

pub fn if_(condition: Box<dyn Expr>, then_branch: Box<dyn Expr>, else_branch: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(If::new(condition, then_branch, else_branch))
}

pub fn let_(slot: usize, value: Box<dyn Expr>, body: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(Let::new(slot, value, body))
}

/// Explicit trampoline, for trees assembled without `RootNode::define`
pub fn trampoline(body: Box<dyn Expr>) -> Box<dyn Expr> {
    Box::new(Trampoline::new(body))
}
