//! Integer arithmetic primitives.
//!
//! - `AddOp` - Addition (+)
//! - `SubOp` - Subtraction (-)
//! - `MulOp` - Multiplication (*)
//! - `DivOp` - Division (/)
//! - `ModOp` - Remainder (%)
//!
//! All operations are checked; overflow and division by zero are errors.

use super::{integer_operands, Builtin, BuiltinContext, EvalError, EvalResult, SlowPath, Value};

fn overflow(op: &str, x: i64, y: i64) -> EvalError {
    EvalError::Arithmetic(format!("Integer overflow: {} {} {}", x, op, y))
}

/// Addition operation: (+ a b)
pub struct AddOp;

impl AddOp {
    fn add(args: &[Value]) -> EvalResult<i64> {
        let (x, y) = integer_operands("+", args)?;
        x.checked_add(y).ok_or_else(|| overflow("+", x, y))
    }
}

impl Builtin for AddOp {
    fn name(&self) -> &str {
        "+"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        Self::add(args).map(Value::Int)
    }

    fn run_integer(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<i64, SlowPath> {
        Ok(Self::add(args)?)
    }
}

/// Subtraction operation: (- a b)
pub struct SubOp;

impl SubOp {
    fn sub(args: &[Value]) -> EvalResult<i64> {
        let (x, y) = integer_operands("-", args)?;
        x.checked_sub(y).ok_or_else(|| overflow("-", x, y))
    }
}

impl Builtin for SubOp {
    fn name(&self) -> &str {
        "-"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        Self::sub(args).map(Value::Int)
    }

    fn run_integer(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<i64, SlowPath> {
        Ok(Self::sub(args)?)
    }
}

/// Multiplication operation: (* a b)
pub struct MulOp;

impl MulOp {
    fn mul(args: &[Value]) -> EvalResult<i64> {
        let (x, y) = integer_operands("*", args)?;
        x.checked_mul(y).ok_or_else(|| overflow("*", x, y))
    }
}

impl Builtin for MulOp {
    fn name(&self) -> &str {
        "*"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        Self::mul(args).map(Value::Int)
    }

    fn run_integer(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> Result<i64, SlowPath> {
        Ok(Self::mul(args)?)
    }
}

/// Division operation: (/ a b), truncating toward zero
pub struct DivOp;

impl Builtin for DivOp {
    fn name(&self) -> &str {
        "/"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        let (x, y) = integer_operands("/", args)?;
        if y == 0 {
            return Err(EvalError::Arithmetic("Division by zero".to_string()));
        }
        x.checked_div(y).map(Value::Int).ok_or_else(|| overflow("/", x, y))
    }
}

/// Remainder operation: (% a b)
pub struct ModOp;

impl Builtin for ModOp {
    fn name(&self) -> &str {
        "%"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        let (x, y) = integer_operands("%", args)?;
        if y == 0 {
            return Err(EvalError::Arithmetic("Modulo by zero".to_string()));
        }
        // i64::MIN % -1 overflows
        x.checked_rem(y).map(Value::Int).ok_or_else(|| overflow("%", x, y))
    }
}
