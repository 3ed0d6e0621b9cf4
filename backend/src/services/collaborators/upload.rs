//! CSV upload intake for bulk imports.
//!
//! The request path only validates and stores the upload, then enqueues the
//! background import and immediately returns `202` with the job id; no row
//! is processed synchronously. The stored file is named with a generated
//! uuid so concurrent uploads never collide.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::import;
use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::job_controller::state::JobsState;

/// 10 MiB, matching the JSON body limit configured in `main.rs`.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ACCEPTED_MESSAGE: &str = "file received, queued for processing";

fn has_accepted_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".txt")
}

/// `POST /api/collaborators/imports`.
pub(crate) async fn process(
    user: AuthedUser,
    jobs_state: web::Data<JobsState>,
    ctx: web::Data<AppContext>,
    payload: Multipart,
) -> Result<impl Responder, ApiError> {
    let (stored_path, file_name) = store_upload(&ctx, payload).await?;

    let job_id =
        import::schedule_import_job(jobs_state, ctx, user.id, stored_path, file_name).await;

    Ok(HttpResponse::Accepted().json(serde_json::json!({
        "ok": true,
        "message": ACCEPTED_MESSAGE,
        "job_id": job_id,
    })))
}

/// Streams the `file` part to the uploads directory, enforcing the
/// extension and size limits. Returns the stored path and the original
/// file name (used in the summary email).
async fn store_upload(
    ctx: &AppContext,
    mut payload: Multipart,
) -> Result<(PathBuf, String), ApiError> {
    std::fs::create_dir_all(&ctx.config.uploads_dir)
        .map_err(|e| ApiError::Internal(format!("failed to prepare uploads dir: {}", e)))?;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| ApiError::Validation(format!("invalid multipart payload: {}", e)))?;

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !has_accepted_extension(&filename) {
            return Err(ApiError::Validation(
                "the file must be a .csv or .txt".to_string(),
            ));
        }

        let stored_path = ctx
            .config
            .uploads_dir
            .join(format!("{}.csv", Uuid::new_v4()));
        let file = File::create(&stored_path)
            .map_err(|e| ApiError::Internal(format!("failed to store upload: {}", e)))?;
        let mut writer = BufWriter::new(file);
        let mut written = 0usize;

        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| ApiError::Validation(format!("upload interrupted: {}", e)))?;
            written += chunk.len();
            if written > MAX_UPLOAD_BYTES {
                drop(writer);
                let _ = std::fs::remove_file(&stored_path);
                return Err(ApiError::Validation("the file exceeds 10 MiB".to_string()));
            }
            writer
                .write_all(&chunk)
                .map_err(|e| ApiError::Internal(format!("failed to store upload: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| ApiError::Internal(format!("failed to store upload: {}", e)))?;

        info!("stored upload {} ({} bytes)", stored_path.display(), written);
        return Ok((stored_path, filename));
    }

    Err(ApiError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}
