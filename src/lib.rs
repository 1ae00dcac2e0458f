//! rowpipe: streaming record pipelines between CSV and JSON
//!
//! A reader turns a CSV or JSON source into a lazy sequence of records, an
//! ordered list of steps transforms or drops each record, and a writer
//! serializes the survivors. Programs supply their own [`Pipeline`] and get a
//! complete command line through [`run`].

use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};

pub mod cli;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod record;

// Re-export commonly used types
pub use cli::{Args, CliConfig};
pub use endpoint::{Sink, Source};
pub use error::{ParseError, PipelineError, PipelineResult};
pub use format::{Codec, DelimiterType, Format, FormatOptions, RecordReader, Shape};
pub use pipeline::{
    process_data, process_str, Fallible, Pipeline, PipelineRunner, RunConfig, RunStats, Step,
};
pub use record::{FieldMetadata, Record};

/// Parse the process arguments and run `pipeline` with them.
///
/// `description` becomes the `--help` text. Configuration errors print a
/// diagnostic and exit with status 2; argument errors are reported by clap.
/// Every other error is returned.
pub fn run(pipeline: &Pipeline, shape: Shape, description: &str) -> PipelineResult<RunStats> {
    match run_from(std::env::args_os(), pipeline, shape, description) {
        Err(PipelineError::Usage(e)) => e.exit(),
        Err(e @ PipelineError::Configuration { .. }) => {
            eprintln!("{}", e.user_message());
            std::process::exit(e.exit_code());
        }
        other => other,
    }
}

/// Like [`run`], but with explicit arguments and without exiting the process
pub fn run_from<I, T>(
    args: I,
    pipeline: &Pipeline,
    shape: Shape,
    description: &str,
) -> PipelineResult<RunStats>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Args::command()
        .about(description.to_string())
        .try_get_matches_from(args)?;
    let args = Args::from_arg_matches(&matches)?;
    let config = CliConfig::from_args(args, shape)?;

    logging::init_logging(config.log_level());
    tracing::debug!(run_config = ?config.run_config, steps = pipeline.len(), "resolved configuration");

    let stats = process_data(&config.run_config, pipeline)?;
    if config.want_stats() {
        eprintln!("{}", stats.summary());
    }
    Ok(stats)
}

/// Convert a dictionary-shaped document between formats with default options
pub fn convert_str(input: &str, from: Format, to: Format) -> PipelineResult<String> {
    process_str(
        input,
        Codec::select(from, Shape::Dictionary),
        Codec::select(to, Shape::Dictionary),
        &Pipeline::new(),
        &FormatOptions::default(),
    )
}
