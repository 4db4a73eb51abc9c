//! Trampoline Engine - Iterative Tail Calls
//!
//! `Trampoline` wraps the body of a callable whose body can end in a tail
//! call. When the body hands back a pending call, the trampoline performs it
//! in a loop rather than by recursion. Each callee is entered through
//! `IndirectCallSite::bounce`, which skips the callee's own trampoline, so a
//! chain of tail calls across any number of callables keeps a constant
//! native stack depth.

use std::fmt;

use tracing::{debug, trace};

use crate::backend::call::IndirectCallSite;
use crate::backend::frame::Frame;

use super::types::{Completion, TailCall};
use super::super::{ExecResult, Expr};

pub struct Trampoline {
    body: Box<dyn Expr>,
    call_site: IndirectCallSite,
}

impl Trampoline {
    pub fn new(body: Box<dyn Expr>) -> Self {
        Trampoline {
            body,
            call_site: IndirectCallSite::new(),
        }
    }

    #[inline]
    pub fn body(&self) -> &dyn Expr {
        self.body.as_ref()
    }

    /// Perform pending calls until one of them produces a value.
    /// Errors leave the loop immediately and are returned unchanged.
    fn pump(&self, first: TailCall) -> ExecResult {
        let mut pending = first;
        let mut bounces: u64 = 0;

        loop {
            bounces += 1;
            trace!(
                target: "tailwalk::trampoline",
                callee = pending.callee.name(),
                arity = pending.args.len(),
                bounces,
                "bounce"
            );

            let TailCall { callee, args } = pending;
            match self.call_site.bounce(&callee, args)? {
                Completion::TailCall(next) => pending = next,
                done @ Completion::Value(_) => {
                    debug!(target: "tailwalk::trampoline", bounces, "trampoline settled");
                    return Ok(done);
                }
            }
        }
    }
}

impl Expr for Trampoline {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        match self.body.execute(frame)? {
            Completion::TailCall(call) => self.pump(call),
            value => Ok(value),
        }
    }

    fn execute_bounce(&self, frame: &mut Frame) -> ExecResult {
        self.body.execute(frame)
    }

    /// The body is annotated, but no tail call leaves a trampoline.
    fn mark_tail(&mut self) -> bool {
        self.body.mark_tail();
        false
    }
}

impl fmt::Debug for Trampoline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trampoline").field("body", &self.body).finish()
    }
}
