use tracing::debug;

use super::{Builtin, BuiltinContext, EvalResult, Value};

/// Identity that prints its argument: (print-id x)
pub struct PrintIdOp;

impl Builtin for PrintIdOp {
    fn name(&self) -> &str {
        "print-id"
    }

    fn arity(&self) -> usize {
        1
    }

    fn run(&self, args: &[Value], _ctx: &BuiltinContext<'_>) -> EvalResult<Value> {
        let value = args.first().cloned().unwrap_or(Value::Unit);
        debug!(target: "tailwalk::grounded", %value, "print-id");
        println!("{}", value);
        Ok(value)
    }
}
