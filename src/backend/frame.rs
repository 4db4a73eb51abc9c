//! Execution frames.
//!
//! A frame is the storage for one activation of a callable:
//! - argument slots, filled by the caller
//! - local slots, sized by the callee's `FrameDescriptor`
//! - the environment captured by the closure being entered, if any
//!
//! Frames are never shared between activations. Nodes read and write slots
//! through `&mut Frame` and must not keep references past `execute`.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::backend::eval::EvalError;
use crate::backend::models::Value;

/// Argument list for one call.
/// Inline up to 4 arguments, which covers nearly every call site.
pub type Args = SmallVec<[Value; 4]>;

/// Captured environment of a closure (immutable once built)
pub type Env = Arc<[Value]>;

#[derive(Debug)]
pub struct Frame {
    args: Args,
    locals: Vec<Value>,
    env: Option<Env>,
}

impl Frame {
    /// Create a frame with `local_slots` locals initialised to `Unit`
    pub fn new(args: Args, local_slots: usize, env: Option<Env>) -> Self {
        Frame {
            args,
            locals: vec![Value::Unit; local_slots],
            env,
        }
    }

    /// Frame for top-level evaluation outside of any callable
    pub fn empty() -> Self {
        Frame::new(Args::new(), 0, None)
    }

    #[inline]
    pub fn arg(&self, index: usize) -> Result<&Value, EvalError> {
        self.args.get(index).ok_or(EvalError::InvalidSlot {
            kind: "argument",
            index,
            len: self.args.len(),
        })
    }

    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    #[inline]
    pub fn local(&self, slot: usize) -> Result<&Value, EvalError> {
        self.locals.get(slot).ok_or(EvalError::InvalidSlot {
            kind: "local",
            index: slot,
            len: self.locals.len(),
        })
    }

    #[inline]
    pub fn set_local(&mut self, slot: usize, value: Value) -> Result<(), EvalError> {
        let len = self.locals.len();
        match self.locals.get_mut(slot) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(EvalError::InvalidSlot {
                kind: "local",
                index: slot,
                len,
            }),
        }
    }

    #[inline]
    pub fn captured(&self, index: usize) -> Result<&Value, EvalError> {
        let env: &[Value] = self.env.as_deref().unwrap_or(&[]);
        env.get(index).ok_or(EvalError::InvalidSlot {
            kind: "captured",
            index,
            len: env.len(),
        })
    }
}
