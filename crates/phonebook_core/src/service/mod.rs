//! Directory use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, in-memory mutation and persistence.
//! - Keep the console layer decoupled from storage details.

pub mod directory_service;
