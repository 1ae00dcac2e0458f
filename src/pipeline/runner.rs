//! Drives records from a reader, through a pipeline, into a writer

use std::io::{Cursor, Read, Write};
use std::time::Instant;

use crate::error::{PipelineError, PipelineResult};
use crate::format::{Codec, FormatOptions, Records};
use crate::pipeline::{Pipeline, RunConfig, RunStats};
use crate::record::FieldMetadata;

/// Runs one pipeline against a reader and writer pair
pub struct PipelineRunner<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    /// Read every record from `source`, apply the pipeline and hand the
    /// survivors to the writer.
    ///
    /// Records flow lazily; the writer pulls each one only when it is ready
    /// for it, so a streaming reader never holds more than one record.
    #[allow(clippy::too_many_arguments)]
    pub fn run<R, W>(
        &self,
        reader: Codec,
        source: R,
        source_target: &str,
        writer: Codec,
        sink: W,
        sink_target: &str,
        options: &FormatOptions,
    ) -> PipelineResult<RunStats>
    where
        R: Read + 'static,
        W: Write,
    {
        let start_time = Instant::now();

        let (fields, records) = reader.open(source, source_target, options)?.into_parts();
        let mut stats = self.drive(fields, records, writer, sink, sink_target, options)?;
        stats.set_elapsed(start_time.elapsed());
        Ok(stats)
    }

    /// Pull records through the pipeline into the writer, counting as they pass
    fn drive<W: Write>(
        &self,
        fields: FieldMetadata,
        records: Records,
        writer: Codec,
        sink: W,
        sink_target: &str,
        options: &FormatOptions,
    ) -> PipelineResult<RunStats> {
        let mut read = 0usize;
        let mut dropped = 0usize;
        let pipeline = self.pipeline;

        let processed = records.enumerate().filter_map(|(index, item)| {
            let record = match item {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            read += 1;
            match pipeline.apply(index, record) {
                Ok(Some(record)) => Some(Ok(record)),
                Ok(None) => {
                    dropped += 1;
                    None
                }
                Err(e) => Some(Err(e)),
            }
        });

        let written = writer.write(sink, sink_target, &fields, processed, options)?;

        Ok(RunStats {
            records_read: read,
            records_dropped: dropped,
            records_written: written,
            field_count: fields.len(),
            ..RunStats::default()
        })
    }
}

/// Run a pipeline between the endpoints named by `config`.
///
/// The output is only created once the input has been opened and its field
/// metadata read, so a missing or malformed input leaves the output untouched.
pub fn process_data(config: &RunConfig, pipeline: &Pipeline) -> PipelineResult<RunStats> {
    config.validate()?;

    let source_target = config.input.description();
    let sink_target = config.output.description();
    let source = config.input.open()?;

    let start_time = Instant::now();
    let reader = config.reader();
    let opened = reader.open(source, &source_target, &config.options)?;
    let (fields, records) = opened.into_parts();

    // Created only after the input is known to be readable
    let sink = config.output.create()?;
    let runner = PipelineRunner::new(pipeline);
    let mut stats = runner.drive(
        fields,
        records,
        config.writer(),
        sink,
        &sink_target,
        &config.options,
    )?;
    stats.set_elapsed(start_time.elapsed());

    tracing::info!(
        input = %source_target,
        output = %sink_target,
        read = stats.records_read,
        dropped = stats.records_dropped,
        written = stats.records_written,
        "pipeline finished"
    );
    Ok(stats)
}

/// Convert an in-memory document, returning the serialized output
pub fn process_str(
    input: &str,
    reader: Codec,
    writer: Codec,
    pipeline: &Pipeline,
    options: &FormatOptions,
) -> PipelineResult<String> {
    let source = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();

    PipelineRunner::new(pipeline).run(reader, source, "input", writer, &mut output, "output", options)?;

    String::from_utf8(output).map_err(|e| {
        PipelineError::io(
            "output",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}
