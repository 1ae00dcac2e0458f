//! Input sources and output sinks

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Where records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl Source {
    /// `-` means standard input; anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Stdin => "standard input".to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            Source::Stdin => None,
        }
    }

    /// Open the source for reading
    pub fn open(&self) -> PipelineResult<Box<dyn Read>> {
        match self {
            Source::File(path) => {
                let file = File::open(path).map_err(|e| PipelineError::io(self.description(), e))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Source::Stdin => Ok(Box::new(std::io::stdin().lock())),
        }
    }
}

/// Where records are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// A file on disk, created or truncated
    File(PathBuf),
    /// Standard output stream
    Stdout,
}

impl Sink {
    /// `-` means standard output; anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Sink::Stdout
        } else {
            Sink::File(PathBuf::from(arg))
        }
    }

    /// Get a human-readable description of the sink
    pub fn description(&self) -> String {
        match self {
            Sink::File(path) => path.display().to_string(),
            Sink::Stdout => "standard output".to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::File(path) => Some(path),
            Sink::Stdout => None,
        }
    }

    /// Create the sink, making any missing parent directories
    pub fn create(&self) -> PipelineResult<Box<dyn Write>> {
        match self {
            Sink::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)
                            .map_err(|e| PipelineError::io(self.description(), e))?;
                    }
                }
                let file =
                    File::create(path).map_err(|e| PipelineError::io(self.description(), e))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            Sink::Stdout => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
        }
    }
}

/// True when both endpoints name the same existing file
pub fn same_file(source: &Source, sink: &Sink) -> bool {
    match (source.path(), sink.path()) {
        (Some(input), Some(output)) => match (input.canonicalize(), output.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}
