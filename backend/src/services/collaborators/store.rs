use actix_web::{web, HttpResponse, Responder};
use common::requests::CollaboratorPayload;

use super::payload::sanitize_payload;
use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;

/// `POST /api/collaborators` — create a collaborator for the caller.
/// The payload goes through the same sanitization as an imported CSV row;
/// uniqueness conflicts come back as `409`.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    payload: web::Json<CollaboratorPayload>,
) -> Result<impl Responder, ApiError> {
    let new = sanitize_payload(user.id, &payload)?;
    let repo = ctx.collaborators.clone();
    let created = web::block(move || repo.create(&new)).await??;
    Ok(HttpResponse::Created().json(created))
}
