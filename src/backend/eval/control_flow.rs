use crate::backend::frame::Frame;
use crate::backend::models::Value;

use super::{EvalError, ExecResult, Expr, SlowPath};

/// Conditional: (if condition then-branch else-branch)
///
/// Only the chosen branch is evaluated. Both branches are in tail position
/// when the conditional is; the condition never is.
#[derive(Debug)]
pub struct If {
    condition: Box<dyn Expr>,
    then_branch: Box<dyn Expr>,
    else_branch: Box<dyn Expr>,
}

impl If {
    pub fn new(condition: Box<dyn Expr>, then_branch: Box<dyn Expr>, else_branch: Box<dyn Expr>) -> Self {
        If {
            condition,
            then_branch,
            else_branch,
        }
    }
}

impl Expr for If {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        let chosen = match self.condition.execute_bool(frame) {
            Ok(b) => b,
            Err(SlowPath::Unexpected(other)) => match other {
                Value::Bool(b) => b,
                other => {
                    return Err(EvalError::TypeError {
                        expected: "Bool",
                        got: other.type_name(),
                    })
                }
            },
            Err(SlowPath::Error(err)) => return Err(err),
        };

        if chosen {
            self.then_branch.execute(frame)
        } else {
            self.else_branch.execute(frame)
        }
    }

    fn mark_tail(&mut self) -> bool {
        // both branches must be visited
        let then_tail = self.then_branch.mark_tail();
        let else_tail = self.else_branch.mark_tail();
        then_tail || else_tail
    }
}
