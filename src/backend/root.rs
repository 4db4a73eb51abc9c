//! Root nodes: the callable units of a node tree.
//!
//! A `RootNode` pairs a body with the static shape of the frame it runs in.
//! Roots are shared as `CallTarget` handles. They can be declared before
//! their body exists, which lets mutually recursive callables refer to each
//! other; the body is then defined exactly once.
//!
//! Defining a body runs the tail annotation pass. The pass has to finish
//! before the body is published, and publication goes through a `OnceLock`,
//! so every execution observes the settled `is_tail` flags.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use tracing::debug;

use crate::backend::call::{self, Entry};
use crate::backend::eval::{EvalError, EvalResult, ExecResult, Expr, Trampoline};
use crate::backend::frame::{Args, Env, Frame};
use crate::backend::models::Value;

/// Shared handle to a root node
pub type CallTarget = Arc<RootNode>;

/// Static shape of the frames a root runs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// Number of local slots beyond the arguments
    pub local_slots: usize,
}

impl FrameDescriptor {
    pub fn with_locals(local_slots: usize) -> Self {
        FrameDescriptor { local_slots }
    }
}

pub struct RootNode {
    name: String,
    arity: usize,
    descriptor: FrameDescriptor,
    body: OnceLock<Box<dyn Expr>>,
}

impl RootNode {
    /// Declare a target whose body will be defined later
    pub fn declare(name: impl Into<String>, arity: usize, descriptor: FrameDescriptor) -> CallTarget {
        Arc::new(RootNode {
            name: name.into(),
            arity,
            descriptor,
            body: OnceLock::new(),
        })
    }

    /// Create a target whose body is built from a weak handle to the target
    /// itself. The body is installed as-is, with no annotation pass.
    pub fn with_body(
        name: impl Into<String>,
        arity: usize,
        descriptor: FrameDescriptor,
        body: impl FnOnce(Weak<RootNode>) -> Box<dyn Expr>,
    ) -> CallTarget {
        Arc::new_cyclic(|this| RootNode {
            name: name.into(),
            arity,
            descriptor,
            body: OnceLock::from(body(this.clone())),
        })
    }

    /// Define the body, annotating tail positions when `tail_calls` is set.
    ///
    /// If annotation marked any tail call, the body is wrapped in a
    /// trampoline so that no pending call can leave this root.
    pub fn define(&self, body: Box<dyn Expr>, tail_calls: bool) -> EvalResult<()> {
        let body = annotate(body, tail_calls);
        self.define_raw(body)
    }

    /// Define the body exactly as given, with no annotation pass
    pub fn define_raw(&self, body: Box<dyn Expr>) -> EvalResult<()> {
        self.body
            .set(body)
            .map_err(|_| EvalError::Redefinition(self.name.clone()))?;
        debug!(target: "tailwalk::root", name = %self.name, arity = self.arity, "defined call target");
        Ok(())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn descriptor(&self) -> FrameDescriptor {
        self.descriptor
    }

    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }

    pub fn body(&self) -> Option<&dyn Expr> {
        self.body.get().map(|b| b.as_ref())
    }

    /// Call from outside any node tree: checks arity, settles tail calls
    /// and requires a value.
    pub fn call(&self, args: Args) -> EvalResult<Value> {
        if args.len() != self.arity {
            return Err(EvalError::Arity {
                callee: self.name.clone(),
                expected: self.arity,
                got: args.len(),
            });
        }
        self.enter(args, None, Entry::Call)?.into_value()
    }

    /// Allocate a frame for this root and run its body in it
    pub(crate) fn enter(&self, args: Args, env: Option<Env>, entry: Entry) -> ExecResult {
        let _depth = call::depth::enter(&self.name)?;
        let body = self
            .body
            .get()
            .ok_or_else(|| EvalError::UndefinedTarget(self.name.clone()))?;

        let mut frame = Frame::new(args, self.descriptor.local_slots, env);
        match entry {
            Entry::Call => body.execute(&mut frame),
            Entry::Bounce => body.execute_bounce(&mut frame),
        }
    }
}

/// Tail annotation pass over a callable body
pub fn annotate(mut body: Box<dyn Expr>, tail_calls: bool) -> Box<dyn Expr> {
    if tail_calls && body.mark_tail() {
        Box::new(Trampoline::new(body))
    } else {
        body
    }
}

impl fmt::Debug for RootNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bodies may refer back to this root; print the shape only
        f.debug_struct("RootNode")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("descriptor", &self.descriptor)
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// One-shot construction of a root whose body does not refer to itself
#[derive(Debug, Clone)]
pub struct RootBuilder {
    name: String,
    arity: usize,
    descriptor: FrameDescriptor,
    tail_calls: bool,
}

impl RootBuilder {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        RootBuilder {
            name: name.into(),
            arity,
            descriptor: FrameDescriptor::default(),
            tail_calls: true,
        }
    }

    pub fn locals(mut self, local_slots: usize) -> Self {
        self.descriptor = FrameDescriptor::with_locals(local_slots);
        self
    }

    pub fn tail_calls(mut self, enabled: bool) -> Self {
        self.tail_calls = enabled;
        self
    }

    /// Declare without a body
    pub fn declare(&self) -> CallTarget {
        RootNode::declare(self.name.clone(), self.arity, self.descriptor)
    }

    pub fn build(self, body: Box<dyn Expr>) -> EvalResult<CallTarget> {
        let target = self.declare();
        target.define(body, self.tail_calls)?;
        Ok(target)
    }
}
