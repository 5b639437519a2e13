//! Model provider implementations.

pub mod openai;
