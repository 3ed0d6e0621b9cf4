use actix_web::{web, HttpResponse, Responder};

use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::repository::RepoError;

/// `DELETE /api/collaborators/{id}` — removes an owned record. Deleting a
/// record owned by another manager is a `403`.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    id: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let id = id.into_inner();
    let repo = ctx.collaborators.clone();

    web::block(move || repo.delete(user.id, id))
        .await?
        .map_err(|e| match e {
            RepoError::NotFound => {
                ApiError::Forbidden("not allowed to delete this record".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "collaborator deleted" })))
}
