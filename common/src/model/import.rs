use serde::{Deserialize, Serialize};

/// One sampled row-level defect from a CSV import.
///
/// `line` is the 1-based line number in the uploaded file when the CSV
/// reader could attribute one, otherwise `"unknown"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    pub line: String,
    pub reason: String,
}

/// Final accounting of a single import run.
///
/// Accumulated monotonically while the file is streamed and reported once at
/// the end, both through the job status endpoint and in the summary email.
/// `errors` is a sample capped at the first ten row-level defects; `skipped`
/// always carries the full count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: u64,
    pub skipped: u64,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn total(&self) -> u64 {
        self.created + self.skipped
    }
}
