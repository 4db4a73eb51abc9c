use std::fmt;

use tracing::trace;

use crate::backend::eval::{EvalError, ExecResult};
use crate::backend::frame::Args;
use crate::backend::root::CallTarget;

use super::Entry;

/// Call site bound to a single, statically known target.
///
/// Used by non-tail application nodes. Every call enters the target in
/// full, growing the native stack by one activation.
#[derive(Clone)]
pub struct DirectCallSite {
    target: CallTarget,
}

impl DirectCallSite {
    pub fn new(target: CallTarget) -> Self {
        DirectCallSite { target }
    }

    #[inline]
    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    pub fn call(&self, args: Args) -> ExecResult {
        trace!(target: "tailwalk::call", callee = self.target.name(), "direct call");
        if args.len() != self.target.arity() {
            return Err(EvalError::Arity {
                callee: self.target.name().to_string(),
                expected: self.target.arity(),
                got: args.len(),
            });
        }
        self.target.enter(args, None, Entry::Call)
    }
}

impl fmt::Debug for DirectCallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DirectCallSite").field(&self.target.name()).finish()
    }
}
