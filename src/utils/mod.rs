//! Utility functions shared across the application.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Destination URL validation

pub mod code_generator;
pub mod url_validator;
