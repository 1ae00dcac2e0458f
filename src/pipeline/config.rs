//! Configuration for a single pipeline run

use crate::endpoint::{same_file, Sink, Source};
use crate::error::{PipelineError, PipelineResult};
use crate::format::{Codec, DelimiterType, Format, FormatOptions, Shape};

/// Everything needed to run a pipeline once
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: Source,
    pub output: Sink,
    pub input_format: Format,
    pub output_format: Format,
    /// Record shape used by both the reader and the writer
    pub shape: Shape,
    pub options: FormatOptions,
}

impl RunConfig {
    /// Create a dictionary-shaped configuration with default format options
    pub fn new(input: Source, output: Sink, input_format: Format, output_format: Format) -> Self {
        Self {
            input,
            output,
            input_format,
            output_format,
            shape: Shape::Dictionary,
            options: FormatOptions::default(),
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.options.pretty = pretty;
        self
    }

    pub fn reader(&self) -> Codec {
        Codec::select(self.input_format, self.shape)
    }

    pub fn writer(&self) -> Codec {
        Codec::select(self.output_format, self.shape)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> PipelineResult<()> {
        // CSV input is streamed, so truncating it first would lose records
        if same_file(&self.input, &self.output) {
            return Err(PipelineError::configuration(format!(
                "input and output both refer to {}",
                self.input.description()
            )));
        }

        if self.options.pretty && self.output_format == Format::Csv {
            tracing::warn!("--pretty has no effect on CSV output");
        }

        Ok(())
    }
}
