//! Completion types for tail-call elimination.
//!
//! A pending tail call is ordinary data returned up the tree, never an
//! unwind. The type forces every node to either forward it or reject it.

use crate::backend::call::Callee;
use crate::backend::frame::Args;
use crate::backend::models::Value;

use super::super::{EvalError, EvalResult};

/// A call that still has to happen.
///
/// Built by an application node in tail position in place of performing the
/// call, and consumed by the nearest enclosing trampoline. Holds exactly one
/// argument container; the callee is a reference-counted handle.
#[derive(Debug, Clone)]
pub struct TailCall {
    pub callee: Callee,
    pub args: Args,
}

impl TailCall {
    #[inline]
    pub fn new(callee: Callee, args: Args) -> Self {
        TailCall { callee, args }
    }
}

/// Outcome of executing a node
#[derive(Debug, Clone)]
pub enum Completion {
    /// Evaluation finished with a value
    Value(Value),
    /// Evaluation ended in a call the enclosing trampoline must perform
    TailCall(TailCall),
}

impl Completion {
    /// Require a value. A pending tail call at this point means the tree was
    /// built without a trampoline where one was needed.
    #[inline]
    pub fn into_value(self) -> EvalResult<Value> {
        match self {
            Completion::Value(value) => Ok(value),
            Completion::TailCall(call) => Err(EvalError::EscapedTailCall {
                callee: call.callee.name().to_string(),
            }),
        }
    }

    #[inline]
    pub fn is_tail_call(&self) -> bool {
        matches!(self, Completion::TailCall(_))
    }
}

impl From<Value> for Completion {
    #[inline]
    fn from(value: Value) -> Self {
        Completion::Value(value)
    }
}
