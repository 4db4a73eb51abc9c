//! Binding forms: local slots and closure capture.

use std::fmt;
use std::sync::Arc;

use crate::backend::frame::{Env, Frame};
use crate::backend::models::{Closure, Value};
use crate::backend::root::CallTarget;

use super::{Completion, ExecResult, Expr};

/// (let slot value body): evaluate `value` into a local slot, then the body.
///
/// The body is in tail position when the let is.
#[derive(Debug)]
pub struct Let {
    slot: usize,
    value: Box<dyn Expr>,
    body: Box<dyn Expr>,
}

impl Let {
    pub fn new(slot: usize, value: Box<dyn Expr>, body: Box<dyn Expr>) -> Self {
        Let { slot, value, body }
    }
}

impl Expr for Let {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        let value = self.value.execute_value(frame)?;
        frame.set_local(self.slot, value)?;
        self.body.execute(frame)
    }

    fn mark_tail(&mut self) -> bool {
        self.body.mark_tail()
    }
}

/// Lambda node: produces a closure over `target`.
///
/// Each capture expression is evaluated in the current frame, in order, and
/// the results become the closure's environment, read inside the target
/// with `Captured(i)`. The lambda's own body belongs to another callable,
/// so annotating the lambda never reaches into it.
pub struct Lambda {
    captures: Box<[Box<dyn Expr>]>,
    target: CallTarget,
}

impl Lambda {
    pub fn new(target: CallTarget, captures: Vec<Box<dyn Expr>>) -> Self {
        Lambda {
            captures: captures.into_boxed_slice(),
            target,
        }
    }
}

impl Expr for Lambda {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        let env = if self.captures.is_empty() {
            None
        } else {
            let mut values = Vec::with_capacity(self.captures.len());
            for capture in self.captures.iter() {
                values.push(capture.execute_value(frame)?);
            }
            Some(Env::from(values))
        };
        let closure = Closure::new(Arc::clone(&self.target), env);
        Ok(Completion::Value(Value::Closure(Arc::new(closure))))
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("target", &self.target.name())
            .field("captures", &self.captures)
            .finish()
    }
}
