//! Output formatting: JSON, compact JSON, YAML.
//!
//! Responses are rendered in the format selected by `--output` using serde.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render any serializable response in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => render_yaml(data),
    }
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    let yaml = serde_yaml::to_string(data)?;
    Ok(yaml.trim_end().to_owned())
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render and print in one step.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
    quiet: bool,
) -> Result<(), CliError> {
    print_output(&render(format, data)?, quiet);
    Ok(())
}

/// Confirmation for operations without a response body, on stderr.
pub fn status(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
