//! User document definition and its caller-facing error type.

pub mod entity;
pub mod error;

pub use error::*;
