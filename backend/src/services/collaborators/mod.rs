//! Collaborator management endpoints, all scoped to the authenticated
//! manager.
//!
//! The provided routes are:
//! - `GET /api/collaborators` — paginated listing, newest first.
//! - `GET /api/collaborators/{id}` — single record, 404 when absent or
//!   owned by another manager.
//! - `POST /api/collaborators` — create from a sanitized payload.
//! - `PUT /api/collaborators/{id}` — full replace (403 when not owner).
//! - `PATCH /api/collaborators/{id}` — partial update (403 when not owner).
//! - `DELETE /api/collaborators/{id}` — delete (403 when not owner).
//! - `POST /api/collaborators/imports` — multipart CSV upload; stores the
//!   file, enqueues the background import and replies `202` with a job id.
//! - `GET /api/collaborators/imports/status/{job_id}` — poll the status of
//!   an enqueued import.

use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::Scope;

mod delete_one;
pub mod import;
mod import_status;
mod list;
mod patch_one;
mod payload;
mod show;
mod store;
mod update;
mod upload;

const API_PATH: &str = "/api/collaborators";

/// Configures and returns the Actix scope for collaborator routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/imports", post().to(upload::process))
        .route("/imports/status/{job_id}", get().to(import_status::process))
        .route("", get().to(list::process))
        .route("", post().to(store::process))
        .route("/{id}", get().to(show::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", patch().to(patch_one::process))
        .route("/{id}", delete().to(delete_one::process))
}
