//! # Inkwell Shared
//!
//! Wire types of the HTTP API: request bodies, response bodies and the
//! problem document returned on errors.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldErrorBody};
