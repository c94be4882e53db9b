//! Output formatting and writing utilities
//!
//! Results are written as human-readable text, JSON or YAML. Machine
//! formats carry no decoration; human output is colored when enabled.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Outcome of validating one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub language: Option<String>,
    /// Field key to messages, in key order
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

/// Trait for formatting output
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report
    fn format_report(&self, report: &ValidationReport, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_report(&self, report: &ValidationReport, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report, use_color)),
            _ => self.format(report),
        }
    }
}

fn format_report_human(report: &ValidationReport, use_color: bool) -> String {
    let mut output = String::new();

    for (key, messages) in &report.errors {
        let field = if key.is_empty() { "(request)" } else { key.as_str() };
        if use_color {
            output.push_str(&format!("  {}\n", field.bold()));
        } else {
            output.push_str(&format!("  {}\n", field));
        }
        for message in messages {
            output.push_str(&format!("    • {}\n", message));
        }
    }

    if let Some(language) = &report.language {
        output.push_str(&format!("\nLanguage: {}\n", language));
    }

    output
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// The configured output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut value_json = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut value_json);
        trace!(data = %value_json, "Outputting data");

        let formatted = self.format.format(value)?;
        if self.format == OutputFormat::Human {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write a validation report
    ///
    /// Machine formats always get the report; human output skips it when
    /// quiet and there is nothing to list.
    pub fn report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format == OutputFormat::Human && self.quiet && report.valid {
            return Ok(());
        }
        let formatted = self.format.format_report(report, self.use_color)?;
        if self.format == OutputFormat::Human {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose == 0 || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
        } else {
            self.writeln(&format!("DEBUG: {}", message))
        }
    }
}
