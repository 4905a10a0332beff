//! Call a function once, get back an `Outcome` instead of an error or a
//! panic.
//!
//! `tranqui` accepts any function together with a tuple of its arguments.
//! The function may return a `Result` or a future of one; either way the
//! caller gets a future that always completes with an `Outcome<T>`.

pub mod callable;
pub mod error;
pub mod invoke;
pub mod outcome;
pub mod registry;
pub mod settle;

pub use callable::Callable;
pub use error::{Error, ErrorKind};
pub use invoke::tranqui;
pub use outcome::Outcome;
pub use registry::{Call, Registry};
pub use settle::{Deferred, Immediate, Settle};
