//! Tracks the state of background import jobs.
//!
//! An upload enqueues a CSV import that runs outside the request/response
//! cycle (`services/collaborators/import`); this module holds the shared
//! map the status endpoint reads and the channel import tasks report
//! through.
//!
//! - `JobsState`: clonable, thread-safe container injected into the Actix
//!   application state in `main.rs`.
//! - `JobUpdate`: message sent by a running import to the central updater.
//! - `start_job_updater`: long-running task draining `JobUpdate` messages
//!   from the MPSC channel into the shared map.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// Shared state of all background import jobs.
#[derive(Clone)]
pub struct JobsState {
    /// Map from job id to its current status. Single source of truth for
    /// the `GET /api/collaborators/imports/status/{job_id}` endpoint;
    /// guarded by an `RwLock` so status polls never block a running import.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender side of the updater channel. Import tasks push status changes
    /// here instead of writing the map directly, which keeps progress
    /// reporting decoupled from job execution.
    pub tx: mpsc::Sender<JobUpdate>,
}

/// A status change for one background job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            status,
        }
    }
}

/// Drains `JobUpdate` messages into the shared map. Spawned once from
/// `main.rs` and runs for the lifetime of the process.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id.clone(), update.status);
    }
}
