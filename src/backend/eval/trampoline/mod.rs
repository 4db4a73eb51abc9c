//! Trampoline-based Tail Calls
//!
//! This module provides the pending-call completion type and the trampoline
//! node that performs pending calls in a loop instead of by recursion.
//! This keeps native stack usage constant for self and mutual tail recursion.

mod engine;
mod types;


pub use engine::Trampoline;
pub use types::{Completion, TailCall};
