use crate::model::import::ImportReport;
use serde::{Deserialize, Serialize};

/// Status of a background import job, as exposed by the status endpoint.
///
/// `InProgress` carries the number of rows flushed to storage so far.
/// `Completed` carries the final report plus a human-readable message; the
/// message degrades to a softer variant when the summary email could not be
/// delivered, which never invalidates the completed inserts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress(u32),
    Completed { report: ImportReport, message: String },
    Failed(String),
}
