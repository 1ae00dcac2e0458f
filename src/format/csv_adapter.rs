//! CSV readers and writers for both record shapes

use std::borrow::Cow;
use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde_json::{Map, Value};

use crate::error::{PipelineError, PipelineResult};
use crate::format::{Format, FormatOptions, RecordReader};
use crate::record::{cell_text, FieldMetadata, Record};

/// Open a CSV source whose first row names the fields
pub fn open_dict<R: Read + 'static>(
    source: R,
    target: &str,
    options: &FormatOptions,
) -> PipelineResult<RecordReader> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let names: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::from_csv(e, target))?
        .iter()
        .map(str::to_string)
        .collect();
    let fields = FieldMetadata::new(names.clone());

    let target = target.to_string();
    let records = reader.into_records().map(move |row| {
        let row = row.map_err(|e| PipelineError::from_csv(e, &target))?;
        dict_record(&names, &row)
    });

    Ok(RecordReader::new(fields, Box::new(records)))
}

/// Open a headerless CSV source; every row becomes a list of values
pub fn open_anon<R: Read + 'static>(
    source: R,
    target: &str,
    options: &FormatOptions,
) -> PipelineResult<RecordReader> {
    let reader = ReaderBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let target = target.to_string();
    let records = reader.into_records().map(move |row| {
        let row = row.map_err(|e| PipelineError::from_csv(e, &target))?;
        Ok(Record::Values(
            row.iter().map(|cell| Value::String(cell.to_string())).collect(),
        ))
    });

    Ok(RecordReader::new(FieldMetadata::anonymous(), Box::new(records)))
}

/// Short rows are padded with nulls; long rows cannot be mapped to names.
fn dict_record(names: &[String], row: &StringRecord) -> PipelineResult<Record> {
    if row.len() > names.len() {
        let line = row.position().map(|pos| pos.line() as usize);
        return Err(PipelineError::parse(
            Format::Csv,
            format!(
                "row has {} fields but the header has {}",
                row.len(),
                names.len()
            ),
            line.map(|line| (line, 1)),
        ));
    }

    let mut map = Map::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let value = row
            .get(i)
            .map(|cell| Value::String(cell.to_string()))
            .unwrap_or(Value::Null);
        map.insert(name.clone(), value);
    }
    Ok(Record::Fields(map))
}

/// Write a header from `fields`, then one row per record projected by name.
/// Returns the number of rows emitted, not counting the header.
pub fn write_dict<W, I>(
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
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .from_writer(sink);

    if !fields.is_empty() {
        writer
            .write_record(fields.names())
            .map_err(|e| PipelineError::from_csv(e, target))?;
    }

    let mut written = 0;
    for (index, record) in records.enumerate() {
        let map = match record? {
            Record::Fields(map) => map,
            other => {
                return Err(PipelineError::ShapeMismatch {
                    record: index,
                    writer: "dictionary CSV",
                    expected: "a field map",
                    found: other.kind(),
                })
            }
        };

        if let Some(extra) = map.keys().find(|key| !fields.contains(key)) {
            return Err(PipelineError::UnknownField {
                record: index,
                field: extra.clone(),
            });
        }

        // With no header there is nothing to render: every map here is empty.
        if !fields.is_empty() {
            let cells: Vec<Cow<'_, str>> = fields
                .names()
                .iter()
                .map(|name| map.get(name).map(cell_text).unwrap_or(Cow::Borrowed("")))
                .collect();
            writer
                .write_record(cells.iter().map(|cell| cell.as_bytes()))
                .map_err(|e| PipelineError::from_csv(e, target))?;
            written += 1;
        }
    }

    writer.flush().map_err(|e| PipelineError::io(target, e))?;
    Ok(written)
}

/// Write records positionally with no header; each row keeps its own width
pub fn write_anon<W, I>(
    sink: W,
    target: &str,
    records: I,
    options: &FormatOptions,
) -> PipelineResult<usize>
where
    W: Write,
    I: Iterator<Item = PipelineResult<Record>>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .flexible(true)
        .from_writer(sink);

    let mut written = 0;
    for (index, record) in records.enumerate() {
        let record = record?;
        let cells: Vec<Cow<'_, str>> = match &record {
            Record::Values(values) => values.iter().map(cell_text).collect(),
            Record::Scalar(value) => vec![cell_text(value)],
            Record::Fields(_) => {
                return Err(PipelineError::ShapeMismatch {
                    record: index,
                    writer: "anonymous CSV",
                    expected: "a value list",
                    found: record.kind(),
                })
            }
        };
        writer
            .write_record(cells.iter().map(|cell| cell.as_bytes()))
            .map_err(|e| PipelineError::from_csv(e, target))?;
        written += 1;
    }

    writer.flush().map_err(|e| PipelineError::io(target, e))?;
    Ok(written)
}
