pub mod closure;
pub mod value;

pub use closure::Closure;
pub use value::{Unexpected, Value};
