//! Comparison primitives.
//!
//! - `LessOp` - Less than (<)
//! - `LessEqOp` - Less than or equal (<=)
//! - `EqualOp` - Equality (==), defined on every value type

use super::{integer_operands, Builtin, BuiltinContext, EvalError, EvalResult, SlowPath, Value};

/// Less than: (< a b)
pub struct LessOp;

impl Builtin for LessOp {
    fn name(&self) -> &str {
        "<"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        match self.run_bool(args, ctx) {
            Ok(b) => Ok(Value::Bool(b)),
            Err(slow) => slow.into_value(),
        }
    }

    fn run_bool(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<bool, SlowPath> {
        let (x, y) = integer_operands("<", args)?;
        Ok(x < y)
    }
}

/// Less than or equal: (<= a b)
pub struct LessEqOp;

impl Builtin for LessEqOp {
    fn name(&self) -> &str {
        "<="
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        match self.run_bool(args, ctx) {
            Ok(b) => Ok(Value::Bool(b)),
            Err(slow) => slow.into_value(),
        }
    }

    fn run_bool(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<bool, SlowPath> {
        let (x, y) = integer_operands("<=", args)?;
        Ok(x <= y)
    }
}

/// Equality: (== a b)
pub struct EqualOp;

impl Builtin for EqualOp {
    fn name(&self) -> &str {
        "=="
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        match self.run_bool(args, ctx) {
            Ok(b) => Ok(Value::Bool(b)),
            Err(slow) => slow.into_value(),
        }
    }

    fn run_bool(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<bool, SlowPath> {
        match args {
            [a, b] => Ok(a == b),
            _ => Err(SlowPath::Error(EvalError::Arity {
                callee: "==".to_string(),
                expected: 2,
                got: args.len(),
            })),
        }
    }
}
