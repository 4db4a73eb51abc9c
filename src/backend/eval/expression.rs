//! Leaf nodes: literals and frame reads.

use crate::backend::frame::Frame;
use crate::backend::models::Value;

use super::{Completion, ExecResult, Expr, SlowPath};

/// Constant node. Always produces the same value.
#[derive(Debug, Clone)]
pub struct Literal {
    value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Literal { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Expr for Literal {
    #[inline]
    fn execute(&self, _frame: &mut Frame) -> ExecResult {
        Ok(Completion::Value(self.value.clone()))
    }

    fn execute_bool(&self, _frame: &mut Frame) -> Result<bool, SlowPath> {
        match self.value {
            Value::Bool(b) => Ok(b),
            ref other => Err(SlowPath::Unexpected(other.clone())),
        }
    }

    fn execute_integer(&self, _frame: &mut Frame) -> Result<i64, SlowPath> {
        match self.value {
            Value::Int(n) => Ok(n),
            ref other => Err(SlowPath::Unexpected(other.clone())),
        }
    }
}

/// Reads an argument slot
#[derive(Debug, Clone, Copy)]
pub struct Arg(pub usize);

impl Expr for Arg {
    #[inline]
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        Ok(Completion::Value(frame.arg(self.0)?.clone()))
    }
}

/// Reads a local slot
#[derive(Debug, Clone, Copy)]
pub struct Var(pub usize);

impl Expr for Var {
    #[inline]
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        Ok(Completion::Value(frame.local(self.0)?.clone()))
    }
}

/// Reads a slot of the environment captured by the running closure
#[derive(Debug, Clone, Copy)]
pub struct Captured(pub usize);

impl Expr for Captured {
    #[inline]
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        Ok(Completion::Value(frame.captured(self.0)?.clone()))
    }
}
