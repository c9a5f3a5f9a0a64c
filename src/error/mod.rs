// src/error/mod.rs
//
// Application error type shared by every layer

pub mod types;

pub use types::{AppError, AppResult, ErrorKind};
