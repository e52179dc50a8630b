//! Command pattern interfaces
//!
//! Core interfaces for the CLI application, keeping argument handling
//! separate from the work a command performs.

use crate::tiff::errors::CogResult;
use crate::utils::logger::Logger;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CogResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    fn create_command(
        &self,
        args: &clap::ArgMatches,
        logger: &'a Logger,
    ) -> CogResult<Box<dyn Command + 'a>>;
}
