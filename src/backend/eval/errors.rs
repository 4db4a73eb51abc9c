use std::fmt;

/// Errors raised while executing a node tree.
///
/// Pending tail calls are not errors and never travel through this type;
/// see `Completion`. Every variant here propagates unchanged through
/// application and trampoline nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Callee invoked with the wrong number of arguments
    Arity {
        callee: String,
        expected: usize,
        got: usize,
    },
    /// Attempted to call a value that is not callable
    NotCallable { got: &'static str },
    /// Value of the wrong type reached a node that requires a specific type
    TypeError {
        expected: &'static str,
        got: &'static str,
    },
    /// Arithmetic error (division by zero, overflow, etc.)
    Arithmetic(String),
    /// Frame slot index out of range
    InvalidSlot {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    /// Call target declared but its body was never defined
    UndefinedTarget(String),
    /// Call target body defined twice
    Redefinition(String),
    /// Non-tail call nesting exceeded the configured limit
    CallStackOverflow { depth: usize, limit: usize },
    /// A pending tail call reached a context with no trampoline.
    /// This is a construction bug in the node tree, not a runtime condition.
    EscapedTailCall { callee: String },
    /// Runtime error with message
    Runtime(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity {
                callee,
                expected,
                got,
            } => write!(
                f,
                "arity mismatch calling {}: expected {}, got {}",
                callee, expected, got
            ),
            Self::NotCallable { got } => write!(f, "value of type {} is not callable", got),
            Self::TypeError { expected, got } => {
                write!(f, "type error: expected {}, got {}", expected, got)
            }
            Self::Arithmetic(msg) => write!(f, "arithmetic error: {}", msg),
            Self::InvalidSlot { kind, index, len } => write!(
                f,
                "invalid {} slot: index {} but frame has {}",
                kind, index, len
            ),
            Self::UndefinedTarget(name) => write!(f, "call target {} has no body", name),
            Self::Redefinition(name) => write!(f, "call target {} is already defined", name),
            Self::CallStackOverflow { depth, limit } => {
                write!(f, "call stack overflow: depth {} exceeds limit {}", depth, limit)
            }
            Self::EscapedTailCall { callee } => write!(
                f,
                "tail call to {} escaped without an enclosing trampoline",
                callee
            ),
            Self::Runtime(msg) => write!(f, "runtime error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}
