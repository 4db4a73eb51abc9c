//! Closures: a callable target plus its captured environment.
//!
//! A closure may also carry arguments from earlier partial applications.
//! `arity` is the number of arguments still missing before the target can
//! be entered.

use std::fmt;
use std::sync::Arc;

use crate::backend::frame::{Args, Env};
use crate::backend::root::CallTarget;

use super::Value;

pub struct Closure {
    env: Option<Env>,
    pap_args: Args,
    arity: usize,
    target: CallTarget,
}

impl Closure {
    /// Closure over `target` with no arguments applied yet
    pub fn new(target: CallTarget, env: Option<Env>) -> Self {
        let arity = target.arity();
        Closure {
            env,
            pap_args: Args::new(),
            arity,
            target,
        }
    }

    #[inline]
    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    #[inline]
    pub fn env(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    /// Remaining arity
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn pap_args(&self) -> &[Value] {
        &self.pap_args
    }

    /// Partially apply: `args.len()` must be smaller than the remaining arity.
    pub fn pap(&self, args: &[Value]) -> Closure {
        debug_assert!(args.len() < self.arity, "pap must leave arguments missing");
        let mut pap_args = self.pap_args.clone();
        pap_args.extend(args.iter().cloned());
        Closure {
            env: self.env.clone(),
            pap_args,
            arity: self.arity - args.len(),
            target: Arc::clone(&self.target),
        }
    }

    /// Previously applied arguments followed by `args`.
    pub fn saturate(&self, args: impl IntoIterator<Item = Value>) -> Args {
        let mut full = self.pap_args.clone();
        full.extend(args);
        full
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
            && self.arity == other.arity
            && self.pap_args == other.pap_args
            && match (&self.env, &other.env) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("target", &self.target.name())
            .field("arity", &self.arity)
            .field("pap_args", &self.pap_args)
            .field("captured", &self.env.as_ref().map(|e| e.len()))
            .finish()
    }
}
