//! Counters collected while a pipeline runs

use serde::Serialize;
use std::time::Duration;

/// Statistics for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Records produced by the reader
    pub records_read: usize,
    /// Records removed by a step
    pub records_dropped: usize,
    /// Records the writer emitted as rows or array elements
    pub records_written: usize,
    /// Number of field names the reader discovered
    pub field_count: usize,
    /// Wall-clock time for the whole run
    pub processing_time_ms: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.processing_time_ms = elapsed.as_millis() as u64;
    }

    /// Percentage of read records that were dropped
    pub fn drop_rate(&self) -> f32 {
        if self.records_read == 0 {
            0.0
        } else {
            self.records_dropped as f32 / self.records_read as f32 * 100.0
        }
    }

    /// Records read per second
    pub fn throughput(&self) -> f32 {
        if self.processing_time_ms == 0 {
            0.0
        } else {
            self.records_read as f32 / (self.processing_time_ms as f32 / 1000.0)
        }
    }

    /// Multi-line human readable report
    pub fn summary(&self) -> String {
        format!(
            "Records read: {}\nRecords dropped: {} ({:.1}%)\nRecords written: {}\nFields: {}\nProcessing time: {}ms",
            self.records_read,
            self.records_dropped,
            self.drop_rate(),
            self.records_written,
            self.field_count,
            self.processing_time_ms
        )
    }
}
