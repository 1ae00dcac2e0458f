//! Unit tests for step composition and record filtering

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rowpipe::{process_str, Codec, Fallible, FormatOptions, Pipeline, PipelineError, Record, Step};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

const PEOPLE: &str = "name,age\nAna,31\nBo,17\nCara,44\n";

fn age(record: &Record) -> i64 {
    record
        .get_str("age")
        .and_then(|age| age.parse().ok())
        .unwrap_or_default()
}

fn to_json(input: &str, pipeline: &Pipeline) -> String {
    process_str(
        input,
        Codec::DictCsv,
        Codec::DictJson,
        pipeline,
        &FormatOptions::default(),
    )
    .unwrap()
}

#[cfg(test)]
mod step_pipeline_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Dropping every record leaves only the CSV header
    #[test]
    fn test_drop_all_keeps_header() {
        let pipeline = Pipeline::new().step(|_| None);
        let output = process_str(
            PEOPLE,
            Codec::DictCsv,
            Codec::DictCsv,
            &pipeline,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(output, "name,age\n");
        assert_eq!(to_json(PEOPLE, &pipeline), "[]\n");
    }

    /// `[f, g]` equals g applied after f, and g never sees f's drops
    #[test]
    fn test_composition_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let pipeline = Pipeline::new()
            .filter(|r| age(r) >= 18)
            .step(move |r: Record| {
                log.borrow_mut().push(r.get_str("name").unwrap_or_default().to_string());
                let adult = age(&r) >= 18;
                Some(r.with("adult", adult))
            });

        let output = to_json(PEOPLE, &pipeline);
        assert_eq!(
            output,
            "[{\"name\":\"Ana\",\"age\":\"31\",\"adult\":true},{\"name\":\"Cara\",\"age\":\"44\",\"adult\":true}]\n"
        );
        assert_eq!(*seen.borrow(), vec!["Ana".to_string(), "Cara".to_string()]);
    }

    /// A field added by a step must already exist in the CSV header
    #[test]
    fn test_new_field_rejected_by_csv_writer() {
        let pipeline = Pipeline::new().map(|r| r.with("extra", "x"));
        let err = process_str(
            PEOPLE,
            Codec::DictCsv,
            Codec::DictCsv,
            &pipeline,
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert_matches!(err, PipelineError::UnknownField { record: 0, field } => {
            assert_eq!(field, "extra");
        });
    }

    /// Removing a field leaves a blank cell in CSV output
    #[test]
    fn test_removed_field_is_blank() {
        let pipeline = Pipeline::new().map(|mut r| {
            r.remove("age");
            r
        });
        let output = process_str(
            PEOPLE,
            Codec::DictCsv,
            Codec::DictCsv,
            &pipeline,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(output, "name,age\nAna,\nBo,\nCara,\n");
    }

    /// A step may turn a text field into a typed JSON value
    #[test]
    fn test_fallible_parse_step() {
        let pipeline = Pipeline::new().try_step(|r: Record| {
            let raw = r.get_str("age").unwrap_or_default().to_string();
            let parsed: i64 = raw.parse()?;
            Ok(Some(r.with("age", parsed)))
        });
        let output = to_json(PEOPLE, &pipeline);
        let doc: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(doc[2]["age"], json!(44));

        let err = process_str(
            "name,age\nDee,unknown\n",
            Codec::DictCsv,
            Codec::DictJson,
            &pipeline,
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert_matches!(err, PipelineError::Step { step: 0, record: 0, .. });
    }

    /// Custom `Step` implementations plug in alongside closures
    #[test]
    fn test_custom_step_type() {
        struct Rename(&'static str, &'static str);

        impl Step for Rename {
            fn apply(&self, mut record: Record) -> anyhow::Result<Option<Record>> {
                if let Some(value) = record.remove(self.0) {
                    record.set(self.1, value);
                }
                Ok(Some(record))
            }
        }

        let pipeline = Pipeline::new()
            .push(Rename("name", "who"))
            .push(Fallible(|r: Record| -> anyhow::Result<Option<Record>> { Ok(Some(r)) }));
        assert_eq!(pipeline.len(), 2);

        let output = to_json("name\nAna\n", &pipeline);
        assert_eq!(output, "[{\"who\":\"Ana\"}]\n");
    }
}
