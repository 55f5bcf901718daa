//! Command-line front end.

use anyhow::{Context, Result};
use clap::Parser;
use hdrgen_codegen::{Banner, Generator, GeneratorConfig, write_atomic};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generator name recorded in output banners.
pub const GENERATOR: &str = concat!("hdrgen ", env!("CARGO_PKG_VERSION"));

/// Generate a C++ header from a JSON schema document
#[derive(Parser, Debug, Clone)]
#[command(name = "hdrgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schema document to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// Header file to write (defaults to standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Root scope prefixed to schema namespace paths
    #[arg(long, default_value = "st")]
    pub root_scope: String,

    /// Scope for types without a schema namespace
    #[arg(long, default_value = "st")]
    pub type_scope: String,

    /// Scope for attribute types without a schema namespace
    #[arg(long, default_value = "st_attr")]
    pub attribute_scope: String,

    /// Extension used in import include directives
    #[arg(long, default_value = "h")]
    pub header_extension: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the generator configuration from the flags.
    #[must_use]
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .root_scope(&self.root_scope)
            .type_scope(&self.type_scope)
            .attribute_scope(&self.attribute_scope)
            .header_extension(&self.header_extension)
    }

    /// Default log level implied by `-v` flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Reads, validates and renders the input document.
///
/// # Errors
/// Returns an error if the input cannot be read or any generation step
/// fails.
pub fn render(cli: &Cli) -> Result<String> {
    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let doc = hdrgen_schema::parse_document(&json)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    hdrgen_schema::validate_document(&doc)
        .with_context(|| format!("invalid schema document {}", cli.input.display()))?;

    let banner = Banner::new(source_name(&cli.input), GENERATOR, host_name());
    Generator::new(&doc)
        .with_config(cli.config())
        .with_banner(banner)
        .generate()
        .with_context(|| format!("failed to generate header for module '{}'", doc.module.name))
}

/// Renders the header and writes it to the output file or standard output.
///
/// # Errors
/// Returns an error if generation or writing fails; no output is written
/// in that case.
pub fn run(cli: &Cli) -> Result<()> {
    let header = render(cli)?;

    match &cli.output {
        Some(path) => {
            write_atomic(path, &header)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), "header written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(header.as_bytes())
                .context("failed to write to standard output")?;
            stdout.flush().context("failed to flush standard output")?;
        }
    }
    Ok(())
}

fn source_name(input: &Path) -> String {
    input
        .file_name()
        .map_or_else(|| input.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
