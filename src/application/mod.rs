// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above the services
// - Boundary between the moderation UI and the domain
// - Translates between DTOs and domain entities

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
