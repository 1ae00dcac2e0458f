//! Unit tests for converting documents between formats
//!
//! Tests cover:
//! - Dictionary CSV to JSON and back
//! - Heterogeneous JSON objects to CSV
//! - Anonymous (positional) records
//! - Format options and malformed input

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rowpipe::{
    convert_str, process_str, Codec, DelimiterType, Format, FormatOptions, Pipeline, PipelineError,
    Record,
};

#[cfg(test)]
mod record_conversion_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(input: &str, from: Codec, to: Codec) -> String {
        process_str(input, from, to, &Pipeline::new(), &FormatOptions::default()).unwrap()
    }

    /// CSV cells become JSON strings in header order
    #[test]
    fn test_csv_to_json() {
        let output = convert_str("a,b\n1,2\n3,4\n", Format::Csv, Format::Json).unwrap();
        assert_eq!(output, "[{\"a\":\"1\",\"b\":\"2\"},{\"a\":\"3\",\"b\":\"4\"}]\n");
    }

    /// The CSV header is the union of keys; missing keys are blank cells
    #[test]
    fn test_heterogeneous_json_to_csv() {
        let output = convert_str(r#"[{"x":1},{"y":2}]"#, Format::Json, Format::Csv).unwrap();
        assert_eq!(output, "x,y\n1,\n,2\n");
    }

    /// CSV to JSON and back preserves every value and the row order
    #[test]
    fn test_csv_json_round_trip() {
        let csv = "id,name,city\n3,Cara,Oslo\n1,Ana,\"Lima, PE\"\n2,Bo,\n";
        let json = convert(csv, Codec::DictCsv, Codec::DictJson);
        let back = convert(&json, Codec::DictJson, Codec::DictCsv);
        assert_eq!(back, csv);
    }

    /// Nested JSON values are written as compact JSON text in a CSV cell
    #[test]
    fn test_nested_values_in_csv_cells() {
        let output = convert_str(
            r#"[{"id": 1, "tags": ["a", "b"], "meta": {"ok": true}, "none": null}]"#,
            Format::Json,
            Format::Csv,
        )
        .unwrap();
        assert_eq!(output, "id,tags,meta,none\n1,\"[\"\"a\"\",\"\"b\"\"]\",\"{\"\"ok\"\":true}\",\n");
    }

    /// Short rows are padded with null
    #[test]
    fn test_short_csv_row() {
        let output = convert_str("a,b,c\n1\n", Format::Csv, Format::Json).unwrap();
        assert_eq!(output, "[{\"a\":\"1\",\"b\":null,\"c\":null}]\n");
    }

    /// Long rows are a parse error naming the line
    #[test]
    fn test_long_csv_row() {
        let err = convert_str("a,b\n1,2\n3,4,5\n", Format::Csv, Format::Json).unwrap_err();
        assert_matches!(err, PipelineError::Parse(parse) => {
            assert_eq!(parse.format, Format::Csv);
            assert_eq!(parse.location, Some((3, 1)));
        });
    }

    /// A JSON document that is not an array of objects is rejected
    #[test]
    fn test_json_must_be_array_of_objects() {
        assert_matches!(
            convert_str(r#"{"a": 1}"#, Format::Json, Format::Csv),
            Err(PipelineError::Parse(_))
        );
        assert_matches!(
            convert_str(r#"[{"a": 1}, 2]"#, Format::Json, Format::Csv),
            Err(PipelineError::Parse(_))
        );
    }

    /// Swapping the first two positions of anonymous CSV records
    #[test]
    fn test_anonymous_csv_swap() {
        let pipeline = Pipeline::new().map(|mut record: Record| {
            record.swap(0, 1);
            record
        });
        let output = process_str(
            "1,2\n3,4\n",
            Codec::AnonCsv,
            Codec::AnonCsv,
            &pipeline,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(output, "2,1\n4,3\n");
    }

    /// Anonymous CSV rows may have different widths
    #[test]
    fn test_anonymous_ragged_rows() {
        let json = convert("a\nb,c,d\n", Codec::AnonCsv, Codec::AnonJson);
        assert_eq!(json, "[[\"a\"],[\"b\",\"c\",\"d\"]]\n");
        let csv = convert(&json, Codec::AnonJson, Codec::AnonCsv);
        assert_eq!(csv, "a\nb,c,d\n");
    }

    /// Anonymous JSON keeps every element kind
    #[test]
    fn test_anonymous_json_passthrough() {
        let input = r#"[[1,2],{"k":"v"},"text",null]"#;
        assert_eq!(
            convert(input, Codec::AnonJson, Codec::AnonJson),
            "[[1,2],{\"k\":\"v\"},\"text\",null]\n"
        );
    }

    /// The dictionary CSV writer cannot represent a positional record
    #[test]
    fn test_shape_mismatch() {
        let err = process_str(
            r#"[[1, 2]]"#,
            Codec::AnonJson,
            Codec::DictCsv,
            &Pipeline::new(),
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert_matches!(err, PipelineError::ShapeMismatch { record: 0, .. });
    }

    /// Tab-delimited input and pretty JSON output
    #[test]
    fn test_format_options() {
        let options = FormatOptions::new()
            .with_delimiter(DelimiterType::Tab)
            .with_pretty(true);
        let output = process_str(
            "a\tb\n1\t2\n",
            Codec::DictCsv,
            Codec::DictJson,
            &Pipeline::new(),
            &options,
        )
        .unwrap();
        assert_eq!(output, "[\n  {\n    \"a\": \"1\",\n    \"b\": \"2\"\n  }\n]\n");

        let output = process_str(
            r#"[{"a": "x|y", "b": 2}]"#,
            Codec::DictJson,
            Codec::DictCsv,
            &Pipeline::new(),
            &FormatOptions::new().with_delimiter(DelimiterType::Pipe),
        )
        .unwrap();
        assert_eq!(output, "a|b\n\"x|y\"|2\n");
    }

    /// Empty inputs produce empty outputs
    #[test]
    fn test_empty_documents() {
        assert_eq!(convert_str("[]", Format::Json, Format::Csv).unwrap(), "");
        assert_eq!(convert_str("a,b\n", Format::Csv, Format::Json).unwrap(), "[]\n");
        assert_eq!(convert_str("a,b\n", Format::Csv, Format::Csv).unwrap(), "a,b\n");
    }
}
