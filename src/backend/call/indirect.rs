use tracing::trace;

use crate::backend::eval::ExecResult;
use crate::backend::frame::Args;

use super::{dispatch, Callee, Entry};

/// Call site that can invoke any callee discovered at run time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndirectCallSite;

impl IndirectCallSite {
    pub fn new() -> Self {
        IndirectCallSite
    }

    /// Full invocation; the callee's tail calls are settled before returning.
    pub fn call(&self, callee: &Callee, args: Args) -> ExecResult {
        trace!(target: "tailwalk::call", callee = callee.name(), "indirect call");
        dispatch(callee, args, Entry::Call)
    }

    /// Invocation from a trampoline loop.
    ///
    /// The callee's entry trampoline is skipped, so a tail call made by the
    /// callee comes back here as `Completion::TailCall` for the loop to
    /// perform next.
    pub fn bounce(&self, callee: &Callee, args: Args) -> ExecResult {
        dispatch(callee, args, Entry::Bounce)
    }
}
