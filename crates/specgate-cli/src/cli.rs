//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Specgate CLI - bind and validate request contracts
///
/// Binds the route and body of a request, runs the validation pipeline over
/// them and prints the per-field errors in the requested language.
#[derive(Parser, Debug)]
#[command(
    name = "specgate",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SPECGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a change-password request
    Validate(ValidateArgs),

    /// List every error the contract's rules can report
    Rules(RulesArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the request body (JSON or YAML)
    #[arg(value_name = "BODY")]
    pub body: PathBuf,

    /// Route value for the account e-mail
    #[arg(short, long)]
    pub email: Option<String>,

    /// Language requested by the caller, as sent in the language header
    #[arg(short, long)]
    pub language: Option<String>,

    /// Fallback language when the requested one is missing or unsupported
    #[arg(long)]
    pub default_language: Option<String>,

    /// Validate only the bound parameters, not their nested objects
    #[arg(long)]
    pub no_implicit: bool,

    /// Skip elements of a root-level collection
    #[arg(long)]
    pub no_root_collection_elements: bool,

    /// Stop at the first failing rule of each validator
    #[arg(long)]
    pub fail_fast: bool,

    /// Show the bound request (passwords redacted)
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the rules command
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Render messages in this language instead of as raw keys
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file; the extension picks the format
    #[arg(default_value = "specgate.toml")]
    pub path: PathBuf,

    /// Force overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn validate_args() -> ValidateArgs {
        ValidateArgs {
            body: PathBuf::from("body.json"),
            email: None,
            language: None,
            default_language: None,
            no_implicit: false,
            no_root_collection_elements: false,
            fail_fast: false,
            detailed: false,
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: OutputFormat::Human,
            no_color: false,
            command: Commands::Validate(validate_args()),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli { quiet: true, ..cli };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_parse_validate_flags() {
        let cli = Cli::parse_from([
            "specgate",
            "-v",
            "validate",
            "body.json",
            "--email",
            "john@example.com",
            "--language",
            "Polish",
            "--fail-fast",
        ]);
        assert_eq!(cli.verbosity_level(), 1);

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.email.as_deref(), Some("john@example.com"));
        assert_eq!(args.language.as_deref(), Some("Polish"));
        assert!(args.fail_fast);
        assert!(!args.no_implicit);
    }

    #[test]
    fn test_parse_rules_command() {
        let cli = Cli::parse_from(["specgate", "--output", "json", "rules", "-l", "Polish"]);
        assert_eq!(cli.output, OutputFormat::Json);

        let Commands::Rules(args) = cli.command else {
            panic!("expected rules command");
        };
        assert_eq!(args.language.as_deref(), Some("Polish"));
    }
}
