//! Bulk CSV import of collaborators.
//!
//! The upload endpoint stores the file and calls `schedule_import_job`,
//! which immediately returns a job id and runs the pipeline in the
//! background: the blocking orchestrator (`runner`) parses, sanitizes and
//! batch-inserts the rows on the blocking pool, then the async wrapper
//! performs the notifying step and publishes the final job status.
//!
//! Sub-modules:
//! - `header`: resolves CSV column positions for the canonical fields.
//! - `states`: canonicalizes Brazilian state tokens to full names.
//! - `sanitize`: per-row extraction, cleanup and skip classification.
//! - `runner`: the end-to-end orchestrator.

pub mod header;
pub mod runner;
pub mod sanitize;
pub mod states;

use std::path::PathBuf;

use actix_web::web;
use chrono::Utc;
use common::jobs::JobStatus;
use common::model::import::ImportReport;
use log::warn;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::context::AppContext;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::mail::ImportSummary;

const COMPLETED_MESSAGE: &str = "processing completed successfully";
const MAIL_FAILED_MESSAGE: &str = "processing completed, failed to send notification email";

/// Registers a new import job as `Pending`, spawns the background task and
/// returns the job id for status polling.
pub async fn schedule_import_job(
    jobs_state: web::Data<JobsState>,
    ctx: web::Data<AppContext>,
    user_id: i64,
    stored_path: PathBuf,
    file_name: String,
) -> String {
    let job_id = Uuid::new_v4().to_string();
    jobs_state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);

    let tx = jobs_state.tx.clone();
    let job_id_clone = job_id.clone();

    tokio::spawn(async move {
        let status = execute_import(&tx, &ctx, &job_id_clone, user_id, stored_path, file_name).await;
        let _ = tx.send(JobUpdate::new(job_id_clone, status)).await;
    });

    job_id
}

/// Runs the blocking orchestrator, then the notifying step, and produces
/// the job's final status. Every unexpected failure ends up as `Failed`
/// rather than propagating out of the task.
async fn execute_import(
    tx: &mpsc::Sender<JobUpdate>,
    ctx: &AppContext,
    job_id: &str,
    user_id: i64,
    stored_path: PathBuf,
    file_name: String,
) -> JobStatus {
    let progress_tx = tx.clone();
    let progress_job_id = job_id.to_string();
    let repo = ctx.collaborators.clone();

    let handle = tokio::task::spawn_blocking(move || {
        runner::run_import(repo.as_ref(), user_id, &stored_path, |created| {
            let _ = progress_tx.blocking_send(JobUpdate::new(
                progress_job_id.clone(),
                JobStatus::InProgress(created as u32),
            ));
        })
    });

    match handle.await {
        Ok(Ok(report)) => {
            let message = match notify(ctx, user_id, &file_name, &report).await {
                Ok(()) => COMPLETED_MESSAGE.to_string(),
                Err(e) => {
                    warn!("import {} finished but notification failed: {}", job_id, e);
                    MAIL_FAILED_MESSAGE.to_string()
                }
            };
            JobStatus::Completed { report, message }
        }
        Ok(Err(e)) => JobStatus::Failed(e.to_string()),
        Err(join_err) => JobStatus::Failed(format!("import task join error: {}", join_err)),
    }
}

/// Notifying step: looks up the owner and dispatches the summary email.
/// A missing owner silently skips the email; the inserts are already
/// committed either way.
async fn notify(
    ctx: &AppContext,
    user_id: i64,
    file_name: &str,
    report: &ImportReport,
) -> Result<(), String> {
    let users = ctx.users.clone();
    let user = tokio::task::spawn_blocking(move || users.find_by_id(user_id))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;

    let Some(user) = user else {
        warn!("import finished for unknown user id {}", user_id);
        return Ok(());
    };

    let summary = ImportSummary {
        recipient_email: user.email,
        user_name: user.name,
        file_name: file_name.to_string(),
        created: report.created,
        skipped: report.skipped,
        total: report.total(),
        finished_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        errors: report.errors.clone(),
        dashboard_url: ctx.config.dashboard_url(),
    };

    ctx.notifier
        .send_import_summary(&summary)
        .await
        .map_err(|e| e.to_string())
}
