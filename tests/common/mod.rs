/// Shared helpers for the integration tests
///
/// - building programs by name with or without tail annotation
/// - runtimes with a chosen call depth limit
/// - integer argument lists
use tailwalk::backend::grounded::BuiltinRegistry;
use tailwalk::backend::programs;
use tailwalk::backend::{Args, CallTarget, Config, Runtime, Value};

#[allow(dead_code)]
pub fn ints(values: &[i64]) -> Args {
    values.iter().copied().map(Value::Int).collect()
}

/// Build a bundled program, panicking on unknown names
#[allow(dead_code)]
pub fn program(name: &str, tail_calls: bool) -> CallTarget {
    let registry = BuiltinRegistry::with_standard_ops();
    programs::build(name, &registry, tail_calls)
        .expect("program should build")
        .unwrap_or_else(|| panic!("unknown program {}", name))
}

#[allow(dead_code)]
pub fn runtime(tail_calls: bool, max_call_depth: usize) -> Runtime {
    Runtime::new(Config {
        max_call_depth,
        tail_calls,
        ..Config::default()
    })
}
