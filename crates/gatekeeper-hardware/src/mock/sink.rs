//! Diagnostic sink that keeps records in memory.

use crate::traits::DiagnosticSink;

/// Collects diagnostic records for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in order of arrival.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Check whether any record contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records.iter().any(|record| record.contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn log(&mut self, text: &str) {
        self.records.push(text.to_string());
    }
}
