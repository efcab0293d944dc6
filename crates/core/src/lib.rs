//! Domain building blocks for the accounts service.
//!
//! This crate has no I/O: it holds the shared types, the error taxonomy,
//! the password credential hasher, field checks, and the clock abstraction
//! used by token issuance.

pub mod clock;
pub mod credentials;
pub mod error;
pub mod fields;
pub mod types;
