//! # Inkwell Core
//!
//! The domain layer of the Inkwell backend: users, posts and comments,
//! the ownership policy and the input validation rules.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod validation;

pub use error::DomainError;
pub use validation::{FieldError, ValidationErrors};
