use std::fmt;

use tracing::trace;

use crate::backend::call::{Callee, DirectCallSite, IndirectCallSite};
use crate::backend::frame::{Args, Frame};
use crate::backend::root::CallTarget;

use super::{Completion, EvalError, ExecResult, Expr, TailCall};

/// How an application node reaches its callee
enum Operator {
    /// Statically known target
    Direct(DirectCallSite),
    /// Callee computed by an operator expression on every execution
    Indirect {
        rator: Box<dyn Expr>,
        call_site: IndirectCallSite,
    },
}

/// Application node: evaluates its arguments, then calls.
///
/// Outside tail position the call is made immediately and its completion is
/// forwarded. In tail position nothing is called: the node returns a
/// `TailCall` for the enclosing trampoline.
///
/// `is_tail` is only ever written by `mark_tail`, which needs `&mut self`
/// and so cannot run once the tree is shared.
pub struct App {
    operator: Operator,
    args: Box<[Box<dyn Expr>]>,
    is_tail: bool,
}

impl App {
    /// Application of a statically known target
    pub fn direct(target: CallTarget, args: Vec<Box<dyn Expr>>) -> Self {
        App {
            operator: Operator::Direct(DirectCallSite::new(target)),
            args: args.into_boxed_slice(),
            is_tail: false,
        }
    }

    /// Application of whatever callable `rator` evaluates to
    pub fn indirect(rator: Box<dyn Expr>, args: Vec<Box<dyn Expr>>) -> Self {
        App {
            operator: Operator::Indirect {
                rator,
                call_site: IndirectCallSite::new(),
            },
            args: args.into_boxed_slice(),
            is_tail: false,
        }
    }

    #[inline]
    pub fn is_tail(&self) -> bool {
        self.is_tail
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Statically known target, if any
    pub fn target(&self) -> Option<&CallTarget> {
        match &self.operator {
            Operator::Direct(site) => Some(site.target()),
            Operator::Indirect { .. } => None,
        }
    }

    fn evaluate_args(&self, frame: &mut Frame) -> Result<Args, EvalError> {
        let mut values = Args::with_capacity(self.args.len());
        for arg in self.args.iter() {
            values.push(arg.execute_value(frame)?);
        }
        Ok(values)
    }
}

impl Expr for App {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        match &self.operator {
            Operator::Direct(site) => {
                let args = self.evaluate_args(frame)?;
                trace!(
                    target: "tailwalk::app",
                    callee = site.target().name(),
                    tail = self.is_tail,
                    "apply"
                );
                if self.is_tail {
                    let callee = Callee::Target(site.target().clone());
                    return Ok(Completion::TailCall(TailCall::new(callee, args)));
                }
                site.call(args)
            }
            Operator::Indirect { rator, call_site } => {
                // operator first, then arguments left to right
                let callee = Callee::from_value(rator.execute_value(frame)?)?;
                let args = self.evaluate_args(frame)?;
                trace!(
                    target: "tailwalk::app",
                    callee = callee.name(),
                    tail = self.is_tail,
                    "apply"
                );
                if self.is_tail {
                    return Ok(Completion::TailCall(TailCall::new(callee, args)));
                }
                call_site.call(&callee, args)
            }
        }
    }

    fn mark_tail(&mut self) -> bool {
        self.is_tail = true;
        true
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("App");
        match &self.operator {
            Operator::Direct(site) => s.field("callee", site),
            Operator::Indirect { rator, .. } => s.field("rator", rator),
        };
        s.field("args", &self.args)
            .field("is_tail", &self.is_tail)
            .finish()
    }
}
