/// Domain module containing the habit model and its validation rules
/// 
/// This module defines the core entities (Habit, CompletionIndex) and the
/// name validation errors shared by every operation that creates or renames
/// a habit.

pub mod habit;
pub mod completion;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use types::*;

use thiserror::Error;

/// Errors produced when a habit name is rejected
///
/// The display strings are user-facing and shown verbatim as transient
/// error notices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Habit name cannot be empty")]
    EmptyName,
    
    #[error("A habit with this name already exists")]
    DuplicateName,
}
