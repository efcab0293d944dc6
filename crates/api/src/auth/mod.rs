//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 bearer-token generation and validation.
//! - [`session`] -- credential verification and token issuance over the
//!   user directory.

pub mod jwt;
pub mod session;
