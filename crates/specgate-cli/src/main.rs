//! Specgate CLI - bind and validate request contracts from the command line
//!
//! Runs the change-password contract through the validation pipeline and
//! prints the per-field errors a web host would return.

mod cli;
mod config;
mod contracts;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let config = {
        let _config_timer = Timer::new("config_loading");
        tracing::info!("Loading configuration");
        Config::load_with_file(cli.config.as_deref())?
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );
    output.debug(&format!("Request id: {}", logging::current_request_id()))?;

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Rules(args) => handlers::handle_rules(args, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
