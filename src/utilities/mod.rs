//! Shared utilities: error types, string helpers and logging setup.

pub mod errors;
pub mod logger;
pub mod string_utils;

pub use errors::ChatError;
