//! CLI command implementations
//!
//! Command pattern wiring for the CLI application.

pub mod command_traits;
pub mod validate_command;

pub use command_traits::{Command, CommandFactory};
pub use validate_command::ValidateCommand;

use clap::ArgMatches;

use crate::tiff::errors::CogResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct CogcheckCommandFactory;

impl CogcheckCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CogcheckCommandFactory
    }
}

impl Default for CogcheckCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CogcheckCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> CogResult<Box<dyn Command + 'a>> {
        // Validation is the only operation this tool performs
        Ok(Box::new(ValidateCommand::new(args, logger)?))
    }
}
