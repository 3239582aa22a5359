//! Core value objects shared across the domain

pub mod model;
pub mod prompt;

pub use model::Model;
pub use prompt::Prompt;
