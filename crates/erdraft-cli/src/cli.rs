//! Command-line interface for the erdraft utility
//!
//! Reads Mermaid ER text from a file or stdin and writes SVG, a terminal
//! preview, JSON or canonical Mermaid text.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::colorizer::colorize_output;
use erdraft::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use erdraft::plugins::Orchestrator;
use erdraft::{to_mermaid, validate, validate_strict, CharacterSet, LayoutConfig};

/// erdraft - Render Mermaid ER diagrams
#[derive(Parser)]
#[command(name = "erdraft")]
#[command(about = "Render Mermaid ER diagrams as SVG or terminal previews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram as SVG, a terminal preview or draw primitives
    Render {
        /// Input file containing the ER diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Wrap entity rows at this canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Character set for the terminal preview
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in terminal output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Render even when the input fails validation
        #[arg(long)]
        skip_validation: bool,
    },

    /// Print the parsed graph as JSON
    Parse {
        /// Input file to parse (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the input is an ER diagram
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Also reject structural defects, duplicates and dangling relations
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite the input as canonical Mermaid text
    Format {
        /// Input file to format (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Render output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Ascii,
    /// Draw primitives as JSON
    Json,
}

/// Supported terminal character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Options for one `render` invocation
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub width: Option<u32>,
    pub style: StyleChoice,
    pub color: ColorChoice,
    pub skip_validation: bool,
}

/// Main CLI application
pub struct ErdraftApp;

impl ErdraftApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("erdraft v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                format,
                width,
                style,
                color,
                skip_validation,
            } => {
                let options = RenderOptions {
                    format,
                    width,
                    style,
                    color,
                    skip_validation,
                };
                self.render_command(input, output, &options, cli.verbose)
            }
            Commands::Parse { input, output } => self.parse_command(input, output, cli.verbose),
            Commands::Validate { input, strict } => {
                self.validate_command(input, strict, cli.verbose)
            }
            Commands::Format { input, output } => self.format_command(input, output, cli.verbose),
        }
    }

    /// Render the input in the requested format
    pub fn render_to_string(&self, content: &str, options: &RenderOptions) -> Result<String> {
        let config = match options.format {
            OutputFormat::Ascii => LayoutConfig::terminal(),
            OutputFormat::Svg | OutputFormat::Json => LayoutConfig::default(),
        }
        .with_canvas_width(options.width);

        let orchestrator =
            Orchestrator::with_config(config).skip_validation(options.skip_validation);

        match options.format {
            OutputFormat::Svg => orchestrator.process_svg(content),
            OutputFormat::Ascii => orchestrator.process_ascii(content, options.style.into()),
            OutputFormat::Json => {
                let rendered = orchestrator.process(content)?;
                Ok(serde_json::to_string_pretty(&rendered.primitives)?)
            }
        }
    }

    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        options: &RenderOptions,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let rendered = self.render_to_string(&content, options)?;
        debug!(format = ?options.format, bytes = rendered.len(), "Rendered diagram");

        let final_output = if options.format == OutputFormat::Ascii
            && self.should_colorize(&output, options.color)
        {
            colorize_output(&rendered)
        } else {
            rendered
        };

        self.write_output(output, &final_output)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    pub fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    fn parse_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        validate(&content)?;

        let graph = erdraft::parse(&content)?;
        if verbose {
            eprintln!(
                "Parsed {} entities and {} relations",
                graph.entity_count(),
                graph.relation_count()
            );
        }

        self.write_output(output, &serde_json::to_string_pretty(&graph)?)
    }

    fn validate_command(&self, input: Option<PathBuf>, strict: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let result = if strict {
            validate_strict(&content)
        } else {
            validate(&content)
        };

        match result {
            Ok(()) => {
                println!("✓ Valid ER diagram");
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid ER diagram: {}", e);
                Err(e.into())
            }
        }
    }

    fn format_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        validate(&content)?;

        let graph = erdraft::parse(&content)?;
        if verbose {
            eprintln!("Formatting {} entities", graph.entity_count());
        }

        self.write_output(output, &to_mermaid(&graph))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ErdraftApp {
    fn default() -> Self {
        Self::new()
    }
}
