//! CLI module - prompts, table output and the interactive session

pub mod args;
pub mod helpers;
pub mod prompt;
pub mod session;
pub mod table;

pub use args::Cli;
pub use prompt::{PromptError, Prompter, TerminalPrompter};
pub use session::{MenuChoice, Session, SessionError, State};
