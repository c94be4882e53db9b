//! Command handlers for CLI subcommands

mod config;
mod rules;
mod validate;

pub use config::handle_config;
pub use rules::handle_rules;
pub use validate::handle_validate;
