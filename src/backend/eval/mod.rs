// Node evaluation: every expression node executes itself against a frame
//
// execute(node, frame) = Value(v)                 -- ordinary result
//                      | TailCall(callee, args)   -- call still to be made
//
// Only a Trampoline turns TailCall back into a Value. Every other node
// forwards it untouched, and non-tail contexts (arguments, conditions,
// let values) reject it through `execute_value`.

mod app;
mod bindings;
mod control_flow;
mod errors;
mod expression;
mod trampoline;

#[cfg(test)]
mod eval_tests;

use std::fmt;

use crate::backend::frame::Frame;
use crate::backend::models::{Unexpected, Value};

pub use app::App;
pub use bindings::{Lambda, Let};
pub use control_flow::If;
pub use errors::EvalError;
pub use expression::{Arg, Captured, Literal, Var};
pub use trampoline::{Completion, TailCall, Trampoline};

/// Result of executing a node in a position that may hand back a tail call
pub type ExecResult = Result<Completion, EvalError>;

/// Result of evaluation that must produce a value
pub type EvalResult<T> = Result<T, EvalError>;

/// Failure of a type-specialized read.
///
/// `Unexpected` is not an error: the node produced a value of another type
/// and the caller continues on the generic path with the carried value.
#[derive(Debug, Clone)]
pub enum SlowPath {
    Unexpected(Value),
    Error(EvalError),
}

impl SlowPath {
    /// Recover the generic result after a specialized read missed
    #[inline]
    pub fn into_value(self) -> EvalResult<Value> {
        match self {
            SlowPath::Unexpected(value) => Ok(value),
            SlowPath::Error(err) => Err(err),
        }
    }
}

impl From<EvalError> for SlowPath {
    fn from(err: EvalError) -> Self {
        SlowPath::Error(err)
    }
}

impl From<Unexpected> for SlowPath {
    fn from(Unexpected(value): Unexpected) -> Self {
        SlowPath::Unexpected(value)
    }
}

/// The evaluation contract shared by every node.
///
/// A node is built once, annotated through `&mut self` while the tree is
/// still private to its builder, and afterwards only ever executed through
/// `&self`. Published trees are therefore immutable and may be executed
/// concurrently, each execution against its own `Frame`.
pub trait Expr: fmt::Debug + Send + Sync {
    /// Execute against `frame`. May return a pending tail call.
    fn execute(&self, frame: &mut Frame) -> ExecResult;

    /// Execute in a non-tail context where only a value is acceptable.
    #[inline]
    fn execute_value(&self, frame: &mut Frame) -> EvalResult<Value> {
        self.execute(frame)?.into_value()
    }

    /// Execute requiring a boolean result.
    fn execute_bool(&self, frame: &mut Frame) -> Result<bool, SlowPath> {
        Ok(self.execute_value(frame)?.expect_bool()?)
    }

    /// Execute requiring an integer result.
    fn execute_integer(&self, frame: &mut Frame) -> Result<i64, SlowPath> {
        Ok(self.execute_value(frame)?.expect_integer()?)
    }

    /// Execute without intercepting pending tail calls.
    ///
    /// Identical to `execute` for every node except `Trampoline`, which
    /// skips its loop so that the trampoline driving the caller receives the
    /// pending call instead.
    #[inline]
    fn execute_bounce(&self, frame: &mut Frame) -> ExecResult {
        self.execute(frame)
    }

    /// Mark this node as occupying tail position.
    ///
    /// Returns true if a node at or below this one may now produce a tail
    /// call. Calling it again is a no-op returning the same answer.
    fn mark_tail(&mut self) -> bool {
        false
    }
}
