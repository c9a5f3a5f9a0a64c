// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the UI and services
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion for the caller
// - Commands NEVER contain business logic

pub mod comment_commands;

pub use comment_commands::*;
