//! COG validation command
//!
//! Runs the structure validation for one file and prints the rendered
//! report to stdout.

use clap::ArgMatches;
use log::{debug, info};

use crate::api::validate_file;
use crate::commands::command_traits::Command;
use crate::tiff::errors::{CogError, CogResult};
use crate::utils::logger::Logger;

/// Command for validating a file's COG structure
pub struct ValidateCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ValidateCommand<'a> {
    /// Creates a new validate command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CogResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| CogError::GenericError("Missing input file".to_string()))?
            .clone();

        let verbose = args.get_flag("verbose");

        Ok(ValidateCommand {
            input_file,
            verbose,
            logger,
        })
    }
}

impl<'a> Command for ValidateCommand<'a> {
    fn execute(&self) -> CogResult<()> {
        info!("Validating file: {}", self.input_file);

        if self.verbose {
            debug!("Verbose mode enabled");
        }

        let report = validate_file(&self.input_file)?;
        info!("Validation result: {}", report.trim_end());
        print!("{}", report);

        self.logger.log_line("Validation completed")?;
        Ok(())
    }
}
