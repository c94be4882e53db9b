//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, FileFormat};
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::info;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    if args.path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            args.path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&args.path)?;
    info!(path = %args.path.display(), "Wrote default configuration");
    output.success(&format!("✓ Created config at {}", args.path.display()))?;
    Ok(())
}

fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let format = match args.format {
        ConfigFormat::Toml => FileFormat::Toml,
        ConfigFormat::Json => FileFormat::Json,
        ConfigFormat::Yaml => FileFormat::Yaml,
    };
    output.writeln(config.render(format)?.trim_end())
}
