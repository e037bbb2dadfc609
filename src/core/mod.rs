//! Core types and errors for kernel matrix computation

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;
