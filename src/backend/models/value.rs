use std::fmt;
use std::sync::Arc;

use super::closure::Closure;

/// Runtime value produced by evaluating a node.
///
/// Values are opaque to the evaluation core: nodes move them between frames
/// and call sites without inspecting them, except for the type-specialized
/// reads below.
#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    /// Callable closure (Arc-wrapped so sharing is O(1))
    Closure(Arc<Closure>),
}

/// A specialized read found a value of some other type.
///
/// Carries the value that was actually produced so the caller can continue
/// on the generic path without evaluating the node a second time.
#[derive(Debug, Clone)]
pub struct Unexpected(pub Value);

impl Value {
    #[inline]
    pub fn expect_bool(self) -> Result<bool, Unexpected> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(Unexpected(other)),
        }
    }

    #[inline]
    pub fn expect_integer(self) -> Result<i64, Unexpected> {
        match self {
            Value::Int(n) => Ok(n),
            other => Err(Unexpected(other)),
        }
    }

    #[inline]
    pub fn expect_closure(self) -> Result<Arc<Closure>, Unexpected> {
        match self {
            Value::Closure(c) => Ok(c),
            other => Err(Unexpected(other)),
        }
    }

    /// Friendly type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Closure(_) => "Closure",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Closure(c) => write!(f, "<closure {}/{}>", c.target().name(), c.arity()),
        }
    }
}

impl fmt::Display for Unexpected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected result of type {}", self.0.type_name())
    }
}
