//! Grounded (built-in) operations.
//!
//! This module provides the `Builtin` trait and the standard primitives.
//! A builtin is exposed to node trees as an ordinary `CallTarget` whose body
//! reads the arguments from its frame, so applications, closures and
//! trampolines treat primitives and user callables the same way.
//!
//! # Example
//!
//! ```rust
//! use smallvec::smallvec;
//! use tailwalk::backend::grounded::BuiltinRegistry;
//! use tailwalk::backend::Value;
//!
//! let registry = BuiltinRegistry::with_standard_ops();
//! let plus = registry.get("+").unwrap();
//! let sum = plus.call(smallvec![Value::Int(2), Value::Int(3)]).unwrap();
//! assert_eq!(sum, Value::Int(5));
//! ```

mod arithmetic;
mod comparison;
mod fix;
mod io;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::backend::eval::{Completion, EvalError, EvalResult, ExecResult, Expr, SlowPath};
use crate::backend::frame::Frame;
use crate::backend::models::Value;
use crate::backend::root::{CallTarget, FrameDescriptor, RootNode};

pub use arithmetic::{AddOp, DivOp, ModOp, MulOp, SubOp};
pub use comparison::{EqualOp, LessEqOp, LessOp};
pub use fix::FixOp;
pub use io::PrintIdOp;

/// Context handed to a builtin on each invocation
pub struct BuiltinContext<'a> {
    this: &'a Weak<RootNode>,
}

impl BuiltinContext<'_> {
    /// The call target wrapping the running builtin
    pub fn this(&self) -> EvalResult<CallTarget> {
        self.this
            .upgrade()
            .ok_or_else(|| EvalError::Runtime("builtin target was dropped".to_string()))
    }
}

/// A primitive operation over already evaluated arguments.
///
/// `run` is only ever called with exactly `arity()` arguments; the call
/// mechanism rejects other counts before the builtin is entered.
pub trait Builtin: Send + Sync {
    /// The name of this operation (e.g., "+", "<=", "fix")
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    fn run(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> EvalResult<Value>;

    fn run_bool(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> Result<bool, SlowPath> {
        Ok(self.run(args, ctx)?.expect_bool()?)
    }

    fn run_integer(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> Result<i64, SlowPath> {
        Ok(self.run(args, ctx)?.expect_integer()?)
    }
}

/// Body node of a builtin's call target
struct BuiltinBody {
    op: Arc<dyn Builtin>,
    this: Weak<RootNode>,
}

impl Expr for BuiltinBody {
    fn execute(&self, frame: &mut Frame) -> ExecResult {
        let ctx = BuiltinContext { this: &self.this };
        Ok(Completion::Value(self.op.run(frame.args(), &ctx)?))
    }

    fn execute_bool(&self, frame: &mut Frame) -> Result<bool, SlowPath> {
        let ctx = BuiltinContext { this: &self.this };
        self.op.run_bool(frame.args(), &ctx)
    }

    fn execute_integer(&self, frame: &mut Frame) -> Result<i64, SlowPath> {
        let ctx = BuiltinContext { this: &self.this };
        self.op.run_integer(frame.args(), &ctx)
    }
}

impl fmt::Debug for BuiltinBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Builtin").field(&self.op.name()).finish()
    }
}

/// Wrap a builtin as a call target
pub fn builtin_target(op: Arc<dyn Builtin>) -> CallTarget {
    let name = op.name().to_string();
    let arity = op.arity();
    RootNode::with_body(name, arity, FrameDescriptor::default(), |this| {
        Box::new(BuiltinBody { op, this })
    })
}

/// Check operand types for a binary integer primitive
pub(crate) fn integer_operands(name: &str, args: &[Value]) -> EvalResult<(i64, i64)> {
    match args {
        [Value::Int(x), Value::Int(y)] => Ok((*x, *y)),
        [x, y] => {
            let bad = if matches!(x, Value::Int(_)) { y } else { x };
            Err(EvalError::TypeError {
                expected: "Int",
                got: bad.type_name(),
            })
        }
        _ => Err(EvalError::Arity {
            callee: name.to_string(),
            expected: 2,
            got: args.len(),
        }),
    }
}

/// Registry of builtin call targets, keyed by name
#[derive(Clone)]
pub struct BuiltinRegistry {
    targets: HashMap<String, CallTarget>,
}

impl BuiltinRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        BuiltinRegistry {
            targets: HashMap::new(),
        }
    }

    /// Create a registry with the standard primitives
    pub fn with_standard_ops() -> Self {
        let mut registry = Self::new();

        // Arithmetic operations
        registry.register(Arc::new(AddOp));
        registry.register(Arc::new(SubOp));
        registry.register(Arc::new(MulOp));
        registry.register(Arc::new(DivOp));
        registry.register(Arc::new(ModOp));

        // Comparison operations
        registry.register(Arc::new(LessOp));
        registry.register(Arc::new(LessEqOp));
        registry.register(Arc::new(EqualOp));

        registry.register(Arc::new(FixOp));
        registry.register(Arc::new(PrintIdOp));

        registry
    }

    /// Register a builtin, replacing any previous one with the same name
    pub fn register(&mut self, op: Arc<dyn Builtin>) -> CallTarget {
        let target = builtin_target(op);
        self.targets.insert(target.name().to_string(), Arc::clone(&target));
        target
    }

    /// Look up a builtin target by name
    pub fn get(&self, name: &str) -> Option<CallTarget> {
        self.targets.get(name).cloned()
    }

    /// Look up a builtin target, failing with an error naming it
    pub fn require(&self, name: &str) -> EvalResult<CallTarget> {
        self.get(name)
            .ok_or_else(|| EvalError::Runtime(format!("unknown builtin: {}", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::with_standard_ops()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("BuiltinRegistry").field("names", &names).finish()
    }
}
