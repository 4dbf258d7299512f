/// Interactive line shell hosting the habit engine
/// 
/// This module plays the part of the UI: it reads one command per line,
/// applies it to the engine and prints the resulting day view.

pub mod command;
pub mod session;

// Re-export main types
pub use command::{Command, CommandError};
pub use session::{Reply, Session};
