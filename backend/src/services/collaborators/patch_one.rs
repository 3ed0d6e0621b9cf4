use actix_web::{web, HttpResponse, Responder};
use common::requests::CollaboratorPatch;

use super::payload::apply_patch;
use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::repository::RepoError;

/// `PATCH /api/collaborators/{id}` — partial update of an owned record;
/// absent fields keep their current values.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    id: web::Path<i64>,
    patch: web::Json<CollaboratorPatch>,
) -> Result<impl Responder, ApiError> {
    let id = id.into_inner();
    let patch = patch.into_inner();

    let repo = ctx.collaborators.clone();
    let current = web::block({
        let repo = repo.clone();
        move || repo.find_for_user(user.id, id)
    })
    .await?
    .map_err(|e| match e {
        RepoError::NotFound => ApiError::Forbidden("not allowed to modify this record".to_string()),
        other => other.into(),
    })?;

    let merged = apply_patch(&current, &patch)?;
    let updated = web::block(move || repo.update(id, &merged)).await??;
    Ok(HttpResponse::Ok().json(updated))
}
