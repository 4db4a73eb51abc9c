//! Call-depth accounting.
//!
//! Every entry into a call target holds a `DepthGuard` for the duration of
//! the activation. Nesting beyond the per-thread limit fails with
//! `EvalError::CallStackOverflow` rather than exhausting the native stack.
//! The high-water mark is kept so callers can observe how deep a run went.
//!
//! The guard only helps if the thread has room for `limit` activations.
//! `Runtime` evaluates on threads sized with `stack_size_for`; callers that
//! run deep non-tail recursion on their own threads must do the same.

use std::cell::Cell;

use tracing::warn;

use crate::backend::eval::{EvalError, EvalResult};

/// Default maximum nesting of non-tail calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Largest limit a configuration may ask for
pub const MAX_CALL_DEPTH_LIMIT: usize = 16_384;

/// Native stack reserved per nested call. Measured unoptimized builds use
/// about 4 KiB per level for plain recursion.
pub const STACK_BYTES_PER_CALL: usize = 16 * 1024;

/// Native stack reserved for the evaluation thread itself
pub const BASE_STACK_BYTES: usize = 1024 * 1024;

/// Native stack an evaluation thread needs to reach `limit` nested calls
/// and still report `CallStackOverflow` on the next one.
pub fn stack_size_for(limit: usize) -> usize {
    BASE_STACK_BYTES + (limit + 1).saturating_mul(STACK_BYTES_PER_CALL)
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static PEAK: Cell<usize> = const { Cell::new(0) };
    static LIMIT: Cell<usize> = const { Cell::new(DEFAULT_MAX_CALL_DEPTH) };
}

/// Live activation; decrements the depth when dropped
#[must_use]
pub struct DepthGuard {
    _private: (),
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Record entry into a call target named `callee`.
pub fn enter(callee: &str) -> EvalResult<DepthGuard> {
    let depth = DEPTH.with(|d| d.get()) + 1;
    let limit = limit();
    if depth > limit {
        warn!(target: "tailwalk::call", callee, depth, limit, "call stack overflow");
        return Err(EvalError::CallStackOverflow { depth, limit });
    }
    DEPTH.with(|d| d.set(depth));
    PEAK.with(|p| {
        if depth > p.get() {
            p.set(depth);
        }
    });
    Ok(DepthGuard { _private: () })
}

/// Current nesting on this thread
pub fn current() -> usize {
    DEPTH.with(|d| d.get())
}

/// Deepest nesting seen on this thread since the last `reset_peak`
pub fn peak() -> usize {
    PEAK.with(|p| p.get())
}

pub fn reset_peak() {
    PEAK.with(|p| p.set(DEPTH.with(|d| d.get())));
}

pub fn limit() -> usize {
    LIMIT.with(|l| l.get())
}

/// Restores the previous limit when dropped
#[must_use]
pub struct LimitGuard {
    previous: usize,
}

impl Drop for LimitGuard {
    fn drop(&mut self) {
        LIMIT.with(|l| l.set(self.previous));
    }
}

/// Set the limit for this thread until the returned guard is dropped
pub fn with_limit(limit: usize) -> LimitGuard {
    let previous = LIMIT.with(|l| l.replace(limit));
    LimitGuard { previous }
}
