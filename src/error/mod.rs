//! Error types and handling infrastructure for record pipelines

use std::fmt;

use crate::format::Format;

/// Main error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("IO error on {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Record {record} is {found}, but the {writer} writer expects {expected}")]
    ShapeMismatch {
        record: usize,
        writer: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Record {record} has field '{field}' which is not in the output header")]
    UnknownField { record: usize, field: String },

    #[error("Step {step} failed on record {record}: {source}")]
    Step {
        step: usize,
        record: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }

    pub fn parse(format: Format, message: impl Into<String>, location: Option<(usize, usize)>) -> Self {
        Self::Parse(ParseError::new(format, message.into(), location))
    }

    /// Translate a `csv` crate error, keeping IO failures distinct from bad content
    pub fn from_csv(error: csv::Error, target: &str) -> Self {
        let line = error.position().map(|pos| pos.line() as usize);
        if error.is_io_error() {
            return match error.into_kind() {
                csv::ErrorKind::Io(source) => Self::io(target, source),
                other => Self::parse(Format::Csv, format!("{:?}", other), None),
            };
        }

        let message = match error.kind() {
            csv::ErrorKind::Utf8 { err, .. } => format!(
                "invalid UTF-8 in field {} near byte index {}",
                err.field(),
                err.valid_up_to()
            ),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!(
                "found record with {} fields, but the previous record has {} fields",
                len, expected_len
            ),
            _ => error.to_string(),
        };
        Self::parse(Format::Csv, message, line.map(|line| (line, 1)))
    }

    /// Translate a `serde_json` error, keeping IO failures distinct from bad content
    pub fn from_json(error: serde_json::Error, target: &str) -> Self {
        if error.is_io() {
            return Self::io(target, std::io::Error::from(error));
        }

        let location = match error.line() {
            0 => None,
            line => Some((line, error.column())),
        };
        Self::parse(Format::Json, strip_location(&error.to_string()), location)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::Usage(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { message } => message.clone(),
            Self::Usage(err) => err.to_string(),
            Self::Parse(err) => err.to_string(),
            Self::Io { target, source } => match source.kind() {
                std::io::ErrorKind::NotFound => format!("{}: no such file", target),
                std::io::ErrorKind::PermissionDenied => format!("{}: permission denied", target),
                _ => format!("{}: {}", target, source),
            },
            _ => self.to_string(),
        }
    }
}

/// serde_json appends " at line X column Y" to its messages; we report the
/// location separately.
fn strip_location(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Malformed CSV or JSON content
#[derive(Debug, Clone)]
pub struct ParseError {
    pub format: Format,
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(format: Format, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            format,
            message,
            location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parse error: {}", self.format.label(), self.message)?;
        match (self.format, self.location) {
            (Format::Csv, Some((line, _))) => write!(f, " at line {}", line)?,
            (Format::Json, Some((line, col))) => write!(f, " at line {}, column {}", line, col)?,
            _ => {}
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
