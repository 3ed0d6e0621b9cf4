use actix_web::{web, HttpResponse, Responder};

use crate::auth::AuthedUser;
use crate::job_controller::state::JobsState;

/// `GET /api/collaborators/imports/status/{job_id}` — current status of a
/// background import.
pub(crate) async fn process(
    _user: AuthedUser,
    job_id: web::Path<String>,
    state: web::Data<JobsState>,
) -> impl Responder {
    let jobs = state.jobs.read().await;
    match jobs.get(&job_id.into_inner()) {
        Some(status) => HttpResponse::Ok().json(status),
        None => HttpResponse::NotFound().body("job id not found"),
    }
}
