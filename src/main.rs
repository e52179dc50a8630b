use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use cogcheck::commands::{CogcheckCommandFactory, CommandFactory};
use cogcheck::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("cogcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate the Cloud-Optimized GeoTIFF structure of a file")
        .arg(
            Arg::new("input")
                .help("GeoTIFF file to validate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    let logger = match Logger::new("cogcheck.log", verbose) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("cogcheck-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = CogcheckCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => match command.execute() {
            // A completed validation exits with code 1 whether the
            // verdict was valid or not; only open/parse/I-O failures
            // exit with code 0. Kept as-is for drop-in compatibility
            // with existing callers of this tool.
            Ok(()) => process::exit(1),
            Err(e) => {
                error!("Error validating Cloud Optimized GeoTIFF: {}", e);
                eprintln!("Error: {}", e);
                process::exit(0);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
