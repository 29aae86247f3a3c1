//! # Domain Layer
//!
//! Pure transaction logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod validation;
pub mod wire;
