//! JSON readers and writers.
//!
//! Both directions hold the whole document in memory: the readers need every
//! element to compute the field union, and the writers emit a single array.

use std::collections::HashSet;
use std::io::{Read, Write};

use serde_json::Value;

use crate::error::{PipelineError, PipelineResult};
use crate::format::{Format, FormatOptions, RecordReader};
use crate::record::{FieldMetadata, Record};

/// Open a JSON array of objects; the field list is the union of all keys in
/// first-seen order.
pub fn open_dict<R: Read>(source: R, target: &str) -> PipelineResult<RecordReader> {
    let items = read_array(source, target, "an array of objects")?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let map = item.as_object().ok_or_else(|| {
            PipelineError::parse(
                Format::Json,
                format!("element {} is {}, expected an object", index, kind_of(item)),
                None,
            )
        })?;
        for key in map.keys() {
            if seen.insert(key.as_str()) {
                names.push(key.clone());
            }
        }
    }
    let fields = FieldMetadata::new(names);

    let records = items.into_iter().map(|item| Ok(Record::from_json(item)));
    Ok(RecordReader::new(fields, Box::new(records)))
}

/// Open a JSON array of arbitrary elements
pub fn open_anon<R: Read>(source: R, target: &str) -> PipelineResult<RecordReader> {
    let items = read_array(source, target, "an array")?;

    let records = items.into_iter().map(|item| Ok(Record::from_json(item)));
    Ok(RecordReader::new(FieldMetadata::anonymous(), Box::new(records)))
}

fn read_array<R: Read>(source: R, target: &str, expected: &str) -> PipelineResult<Vec<Value>> {
    let document: Value =
        serde_json::from_reader(source).map_err(|e| PipelineError::from_json(e, target))?;

    match document {
        Value::Array(items) => {
            tracing::debug!(source = target, elements = items.len(), "loaded JSON document");
            Ok(items)
        }
        other => Err(PipelineError::parse(
            Format::Json,
            format!("top-level value is {}, expected {}", kind_of(&other), expected),
            None,
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Collect every record and write them as an array of objects
pub fn write_dict<W, I>(
    sink: W,
    target: &str,
    records: I,
    options: &FormatOptions,
) -> PipelineResult<usize>
where
    W: Write,
    I: Iterator<Item = PipelineResult<Record>>,
{
    let mut items = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record?;
        if !matches!(record, Record::Fields(_)) {
            return Err(PipelineError::ShapeMismatch {
                record: index,
                writer: "dictionary JSON",
                expected: "a field map",
                found: record.kind(),
            });
        }
        items.push(record.into_json());
    }
    write_document(sink, target, items, options)
}

/// Collect every record and write them as an array of whatever each record is
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
    let items = records
        .map(|record| record.map(Record::into_json))
        .collect::<PipelineResult<Vec<_>>>()?;
    write_document(sink, target, items, options)
}

fn write_document<W: Write>(
    mut sink: W,
    target: &str,
    items: Vec<Value>,
    options: &FormatOptions,
) -> PipelineResult<usize> {
    let count = items.len();
    let document = Value::Array(items);

    let result = if options.pretty {
        serde_json::to_writer_pretty(&mut sink, &document)
    } else {
        serde_json::to_writer(&mut sink, &document)
    };
    result.map_err(|e| PipelineError::from_json(e, target))?;

    sink.write_all(b"\n")
        .and_then(|_| sink.flush())
        .map_err(|e| PipelineError::io(target, e))?;
    Ok(count)
}
