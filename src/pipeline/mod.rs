//! Step functions and the ordered pipeline that applies them
//!
//! A step maps a record to a replacement record, or to `None` to drop it.
//! Steps run left to right and the first `None` ends processing for that
//! record.

pub mod config;
pub mod runner;
pub mod stats;

pub use config::RunConfig;
pub use runner::{process_data, process_str, PipelineRunner};
pub use stats::RunStats;

use crate::error::{PipelineError, PipelineResult};
use crate::record::Record;

/// One transformation applied to every record
pub trait Step {
    fn apply(&self, record: Record) -> anyhow::Result<Option<Record>>;
}

impl<F> Step for F
where
    F: Fn(Record) -> Option<Record>,
{
    fn apply(&self, record: Record) -> anyhow::Result<Option<Record>> {
        Ok(self(record))
    }
}

/// Adapter for steps that can fail; an error aborts the run
pub struct Fallible<F>(pub F);

impl<F> Step for Fallible<F>
where
    F: Fn(Record) -> anyhow::Result<Option<Record>>,
{
    fn apply(&self, record: Record) -> anyhow::Result<Option<Record>> {
        (self.0)(record)
    }
}

/// Ordered sequence of steps
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    /// Create an empty pipeline; every record passes through unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step returning the replacement record, or `None` to drop it
    pub fn step<F>(self, f: F) -> Self
    where
        F: Fn(Record) -> Option<Record> + 'static,
    {
        self.push(f)
    }

    /// Append a fallible step
    pub fn try_step<F>(self, f: F) -> Self
    where
        F: Fn(Record) -> anyhow::Result<Option<Record>> + 'static,
    {
        self.push(Fallible(f))
    }

    /// Append a step that always keeps the record
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Record) -> Record + 'static,
    {
        self.push(move |record: Record| Some(f(record)))
    }

    /// Append a step that keeps only records matching the predicate
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool + 'static,
    {
        self.push(move |record: Record| predicate(&record).then_some(record))
    }

    /// Append any [`Step`] implementation
    pub fn push<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run one record through every step. `index` is the record's position in
    /// the input and only feeds error messages.
    pub fn apply(&self, index: usize, record: Record) -> PipelineResult<Option<Record>> {
        let mut current = record;
        for (position, step) in self.steps.iter().enumerate() {
            match step.apply(current) {
                Ok(Some(next)) => current = next,
                Ok(None) => {
                    tracing::trace!(record = index, step = position, "record dropped");
                    return Ok(None);
                }
                Err(source) => {
                    return Err(PipelineError::Step {
                        step: position,
                        record: index,
                        source,
                    })
                }
            }
        }
        Ok(Some(current))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}
