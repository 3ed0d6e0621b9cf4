use actix_web::{web, HttpResponse, Responder};
use common::requests::CollaboratorPayload;

use super::payload::sanitize_payload;
use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;

/// `PUT /api/collaborators/{id}` — full replace of an owned record.
/// Touching a record owned by another manager is a `403`.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    id: web::Path<i64>,
    payload: web::Json<CollaboratorPayload>,
) -> Result<impl Responder, ApiError> {
    let id = id.into_inner();
    let new = sanitize_payload(user.id, &payload)?;

    let repo = ctx.collaborators.clone();
    let updated = web::block(move || {
        if !repo.exists_for_user(user.id, id)? {
            return Err(crate::repository::RepoError::NotFound);
        }
        repo.update(id, &new)
    })
    .await?
    .map_err(|e| match e {
        crate::repository::RepoError::NotFound => {
            ApiError::Forbidden("not allowed to modify this record".to_string())
        }
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok().json(updated))
}
