//! Format adapters: one reader/writer pair per (format, shape) combination

pub mod csv_adapter;
pub mod json_adapter;

use std::io::{Read, Write};

use crate::error::PipelineResult;
use crate::record::{FieldMetadata, Record};

/// Serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn label(&self) -> &'static str {
        match self {
            Format::Csv => "CSV",
            Format::Json => "JSON",
        }
    }
}

/// Record shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// Records keyed by field name: CSV with a header, JSON objects
    #[default]
    Dictionary,
    /// Positional records: headerless CSV, JSON arrays
    Anonymous,
}

/// CSV delimiter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterType {
    /// Comma delimiter (,)
    #[default]
    Comma,
    /// Tab delimiter (\\t)
    Tab,
    /// Pipe delimiter (|)
    Pipe,
}

impl DelimiterType {
    pub fn as_byte(&self) -> u8 {
        match self {
            DelimiterType::Comma => b',',
            DelimiterType::Tab => b'\t',
            DelimiterType::Pipe => b'|',
        }
    }
}

/// Options shared by the adapters of a run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatOptions {
    /// Field delimiter for CSV input and output
    pub delimiter: DelimiterType,
    /// Pretty-print JSON output (vs compact)
    pub pretty: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Lazy, single-pass sequence of records produced by a reader
pub type Records = Box<dyn Iterator<Item = PipelineResult<Record>>>;

/// An opened reader: the field metadata is complete before any record is
/// handed out.
pub struct RecordReader {
    fields: FieldMetadata,
    records: Records,
}

impl std::fmt::Debug for RecordReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl RecordReader {
    pub(crate) fn new(fields: FieldMetadata, records: Records) -> Self {
        Self { fields, records }
    }

    pub fn fields(&self) -> &FieldMetadata {
        &self.fields
    }

    pub fn records(self) -> Records {
        self.records
    }

    pub fn into_parts(self) -> (FieldMetadata, Records) {
        (self.fields, self.records)
    }
}

/// The adapter for one (format, shape) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    DictCsv,
    DictJson,
    AnonCsv,
    AnonJson,
}

impl Codec {
    pub fn select(format: Format, shape: Shape) -> Self {
        match (format, shape) {
            (Format::Csv, Shape::Dictionary) => Codec::DictCsv,
            (Format::Json, Shape::Dictionary) => Codec::DictJson,
            (Format::Csv, Shape::Anonymous) => Codec::AnonCsv,
            (Format::Json, Shape::Anonymous) => Codec::AnonJson,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Codec::DictCsv | Codec::AnonCsv => Format::Csv,
            Codec::DictJson | Codec::AnonJson => Format::Json,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Codec::DictCsv | Codec::DictJson => Shape::Dictionary,
            Codec::AnonCsv | Codec::AnonJson => Shape::Anonymous,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::DictCsv => "dictionary CSV",
            Codec::DictJson => "dictionary JSON",
            Codec::AnonCsv => "anonymous CSV",
            Codec::AnonJson => "anonymous JSON",
        }
    }

    /// Open a source, discovering its field metadata.
    ///
    /// `target` names the source in error messages.
    pub fn open<R: Read + 'static>(
        &self,
        source: R,
        target: &str,
        options: &FormatOptions,
    ) -> PipelineResult<RecordReader> {
        tracing::debug!(codec = self.name(), source = target, "opening reader");
        match self {
            Codec::DictCsv => csv_adapter::open_dict(source, target, options),
            Codec::AnonCsv => csv_adapter::open_anon(source, target, options),
            Codec::DictJson => json_adapter::open_dict(source, target),
            Codec::AnonJson => json_adapter::open_anon(source, target),
        }
    }

    /// Serialize records to a sink, returning how many were written
    pub fn write<W, I>(
        &self,
        sink: W,
        target: &str,
        fields: &FieldMetadata,
        records: I,
        options: &FormatOptions,
    ) -> PipelineResult<usize>
    where
        W: Write,
        I: Iterator<Item = PipelineResult<Record>>,
    {
        tracing::debug!(codec = self.name(), sink = target, fields = fields.len(), "writing records");
        match self {
            Codec::DictCsv => csv_adapter::write_dict(sink, target, fields, records, options),
            Codec::AnonCsv => csv_adapter::write_anon(sink, target, records, options),
            Codec::DictJson => json_adapter::write_dict(sink, target, records, options),
            Codec::AnonJson => json_adapter::write_anon(sink, target, records, options),
        }
    }
}
