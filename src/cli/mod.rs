//! Command-line interface module

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::endpoint::{Sink, Source};
use crate::error::{PipelineError, PipelineResult};
use crate::format::{DelimiterType, Format, Shape};
use crate::pipeline::RunConfig;

pub mod infer;

pub use infer::infer_format;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "rowpipe")]
#[command(about = "Stream records between CSV and JSON")]
#[command(version)]
pub struct Args {
    /// Input file, or '-' for standard input
    #[arg(default_value = "-")]
    pub input: String,

    /// Output file, or '-' for standard output
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Input format (overrides suffix inference)
    #[arg(long, value_enum)]
    pub iformat: Option<FormatArg>,

    /// Output format (overrides suffix inference)
    #[arg(long, value_enum)]
    pub oformat: Option<FormatArg>,

    /// Read and write JSON
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Read and write CSV
    #[arg(long)]
    pub csv: bool,

    /// CSV field delimiter: comma, tab, or pipe (default: comma)
    #[arg(long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print run statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Formats accepted by `--iformat` and `--oformat`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => Format::Csv,
            FormatArg::Json => Format::Json,
        }
    }
}

/// Delimiter types for CLI
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Delimiter {
    #[value(name = "comma", alias = ",")]
    Comma,
    #[value(name = "tab", alias = "\t")]
    Tab,
    #[value(name = "pipe", alias = "|")]
    Pipe,
}

impl From<Delimiter> for DelimiterType {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Comma => DelimiterType::Comma,
            Delimiter::Tab => DelimiterType::Tab,
            Delimiter::Pipe => DelimiterType::Pipe,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub run_config: RunConfig,
}

impl CliConfig {
    /// Resolve arguments into a run configuration. No file is touched.
    pub fn from_args(args: Args, shape: Shape) -> PipelineResult<Self> {
        let (input_format, output_format) = resolve_formats(&args)?;

        let mut run_config = RunConfig::new(
            Source::from_arg(&args.input),
            Sink::from_arg(&args.output),
            input_format,
            output_format,
        )
        .with_shape(shape)
        .with_pretty(args.pretty);
        if let Some(delimiter) = args.delimiter {
            run_config = run_config.with_delimiter(delimiter.into());
        }

        Ok(Self { args, run_config })
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Maximum log level implied by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.is_verbose() {
            Level::DEBUG
        } else if self.is_quiet() {
            Level::ERROR
        } else {
            Level::WARN
        }
    }
}

/// Suffix inference first, then `--json`/`--csv`, then the explicit
/// per-side flags.
fn resolve_formats(args: &Args) -> PipelineResult<(Format, Format)> {
    let mut input = infer_format(&args.input);
    let mut output = infer_format(&args.output);

    let both = if args.json {
        Some(Format::Json)
    } else if args.csv {
        Some(Format::Csv)
    } else {
        None
    };
    if let Some(format) = both {
        input = Some(format);
        output = Some(format);
    }

    if let Some(format) = args.iformat {
        input = Some(format.into());
    }
    if let Some(format) = args.oformat {
        output = Some(format.into());
    }

    let input = input.ok_or_else(|| {
        PipelineError::configuration("can't infer input format please specify with --iformat")
    })?;
    let output = output.ok_or_else(|| {
        PipelineError::configuration("can't infer output format please specify with --oformat")
    })?;
    Ok((input, output))
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &PipelineError) {
    eprintln!("{}", error.user_message());

    match error {
        PipelineError::Parse(_) => {
            eprintln!("\nTip: use --iformat to override the input format if the suffix is misleading");
        }
        PipelineError::ShapeMismatch { .. } | PipelineError::UnknownField { .. } => {
            eprintln!("\nTip: the output writer cannot represent what a step produced");
        }
        _ => {}
    }
}
