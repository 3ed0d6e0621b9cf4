use actix_web::{web, HttpResponse, Responder};

use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;

/// `GET /api/collaborators/{id}` — single record. Records owned by another
/// manager are indistinguishable from absent ones.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    id: web::Path<i64>,
) -> Result<impl Responder, ApiError> {
    let id = id.into_inner();
    let repo = ctx.collaborators.clone();
    let found = web::block(move || repo.find_for_user(user.id, id)).await??;
    Ok(HttpResponse::Ok().json(found))
}
