//! Fixed-point combinator over unary functions.
//!
//! fix f x = f (fix f) x
//!
//! `fix f` is the `fix` target partially applied to `f`, so the recursion
//! goes through ordinary closure application. The call to `f` is a full
//! nested call, not a tail call.

use std::sync::Arc;

use smallvec::smallvec;

use crate::backend::call::{Callee, IndirectCallSite};
use crate::backend::models::Closure;

use super::{Builtin, BuiltinContext, EvalError, EvalResult, Value};

/// Fixed point: (fix f x)
pub struct FixOp;

impl Builtin for FixOp {
    fn name(&self) -> &str {
        "fix"
    }

    fn arity(&self) -> usize {
        2
    }

    fn run(&self, args: &[Value], ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        let (f, x) = match args {
            [f, x] => (f.clone(), x.clone()),
            _ => {
                return Err(EvalError::Arity {
                    callee: "fix".to_string(),
                    expected: 2,
                    got: args.len(),
                })
            }
        };
        let fix_f = Closure::new(ctx.this()?, None).pap(&[f.clone()]);
        let callee = Callee::from_value(f)?;
        IndirectCallSite::new()
            .call(&callee, smallvec![Value::Closure(Arc::new(fix_f)), x])?
            .into_value()
    }
}
