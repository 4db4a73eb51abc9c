//! Call mechanisms.
//!
//! - `DirectCallSite` - bound once to a statically known target
//! - `IndirectCallSite` - resolves its callee at every invocation
//! - `depth` - per-thread nesting guard for non-tail calls
//!
//! Both call sites share `dispatch`, which handles exact, partial and
//! over-saturated application of closures.

pub mod depth;
mod direct;
mod indirect;

use std::cmp::Ordering;
use std::sync::Arc;

use crate::backend::eval::{Completion, EvalError, EvalResult, ExecResult};
use crate::backend::frame::Args;
use crate::backend::models::{Closure, Value};
use crate::backend::root::CallTarget;

pub use direct::DirectCallSite;
pub use indirect::IndirectCallSite;

/// Something that can be invoked with an argument list
#[derive(Debug, Clone)]
pub enum Callee {
    /// Bare call target: no captured environment, exact arity required
    Target(CallTarget),
    /// Closure value, possibly partially applied
    Closure(Arc<Closure>),
}

impl Callee {
    /// Resolve a runtime value into a callee
    pub fn from_value(value: Value) -> EvalResult<Callee> {
        match value {
            Value::Closure(closure) => Ok(Callee::Closure(closure)),
            other => Err(EvalError::NotCallable {
                got: other.type_name(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Callee::Target(target) => target.name(),
            Callee::Closure(closure) => closure.target().name(),
        }
    }
}

impl From<CallTarget> for Callee {
    fn from(target: CallTarget) -> Self {
        Callee::Target(target)
    }
}

/// How a target's body is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Full invocation: the callee's own trampoline settles its tail calls
    Call,
    /// Invocation from a trampoline loop: pending tail calls are returned
    Bounce,
}

pub(crate) fn dispatch(callee: &Callee, args: Args, entry: Entry) -> ExecResult {
    match callee {
        Callee::Target(target) => {
            if args.len() != target.arity() {
                return Err(EvalError::Arity {
                    callee: target.name().to_string(),
                    expected: target.arity(),
                    got: args.len(),
                });
            }
            target.enter(args, None, entry)
        }
        Callee::Closure(closure) => apply_closure(closure, args, entry),
    }
}

fn apply_closure(closure: &Arc<Closure>, mut args: Args, entry: Entry) -> ExecResult {
    let arity = closure.arity();
    match args.len().cmp(&arity) {
        Ordering::Less => {
            let pap = closure.pap(&args);
            Ok(Completion::Value(Value::Closure(Arc::new(pap))))
        }
        Ordering::Equal => {
            let full = closure.saturate(args);
            closure.target().enter(full, closure.env().cloned(), entry)
        }
        Ordering::Greater => {
            // call with what the closure takes, then apply the result to the rest
            let rest: Args = args.drain(arity..).collect();
            let full = closure.saturate(args);
            let result = closure
                .target()
                .enter(full, closure.env().cloned(), Entry::Call)?
                .into_value()?;
            dispatch(&Callee::from_value(result)?, rest, entry)
        }
    }
}
