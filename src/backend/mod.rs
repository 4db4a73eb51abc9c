// Backend module: the execution core of the tree-walking interpreter
//
// This module provides the architecture where:
// - `eval`: node contract, application, trampoline and the other node kinds
// - `call`: direct and indirect call sites, closure dispatch, depth guard
// - `root`: callable units (`CallTarget`) and the tail annotation pass
// - `runtime`: top-level driver applying a `Config`

pub mod call;
pub mod config;
pub mod eval;
pub mod frame;
pub mod grounded;
pub mod models;
pub mod nodes;
pub mod programs;
pub mod root;
pub mod runtime;

pub use call::{Callee, DirectCallSite, IndirectCallSite};
pub use config::{Config, ConfigError};
pub use eval::{Completion, EvalError, EvalResult, ExecResult, Expr, SlowPath, TailCall, Trampoline};
pub use frame::{Args, Env, Frame};
pub use grounded::{Builtin, BuiltinRegistry};
pub use models::*;
pub use root::{CallTarget, FrameDescriptor, RootBuilder, RootNode};
pub use runtime::Runtime;
