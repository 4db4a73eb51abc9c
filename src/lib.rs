/// Tailwalk - Tree-walking Interpreter Core
///
/// This library provides the execution core of a tree-walking interpreter:
/// expression nodes that evaluate themselves against a per-call frame, and
/// proper tail calls that keep native stack usage constant for tail
/// recursive programs.
///
/// # Architecture
///
/// 1. **Nodes** (`backend::eval`)
///    - Every node implements `Expr::execute(frame) -> Completion`
///    - A completion is either a value or a pending `TailCall`
///    - Application nodes in tail position return a `TailCall` instead of
///      calling
///
/// 2. **Trampolines** (`backend::eval::Trampoline`)
///    - Wrap each callable body that can end in a tail call
///    - Perform pending calls in a loop instead of by recursion
///
/// 3. **Call targets** (`backend::root`)
///    - Roots are declared, then defined once; defining runs the tail
///      annotation pass and inserts the trampoline
///    - Published trees are immutable and can be shared across threads
///
/// # Example
///
/// ```rust
/// use smallvec::smallvec;
/// use tailwalk::backend::grounded::BuiltinRegistry;
/// use tailwalk::backend::programs::even_odd;
/// use tailwalk::backend::{Runtime, Value};
///
/// let registry = BuiltinRegistry::with_standard_ops();
/// let (is_even, _is_odd) = even_odd(&registry, true).unwrap();
///
/// let runtime = Runtime::default();
/// let result = runtime.run(&is_even, smallvec![Value::Int(100_000)]).unwrap();
/// assert_eq!(result, Value::Bool(true));
/// ```

pub mod backend;

pub use backend::{
    nodes, BuiltinRegistry, CallTarget, Completion, Config, EvalError, Expr, RootBuilder,
    RootNode, Runtime, TailCall, Value,
};
