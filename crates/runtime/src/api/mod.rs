//! Public API surface for hosts embedding a run session.
//!
//! Re-exports the error types and the mutex-guarded session handle.
mod errors;
mod shared;

pub use errors::{Result, RuntimeError};
pub use shared::SharedSession;
