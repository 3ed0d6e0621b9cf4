use actix_web::{web, HttpResponse, Responder};
use common::requests::ListQuery;

use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;

const DEFAULT_PER_PAGE: u32 = 15;

/// `GET /api/collaborators` — one page of the caller's collaborators,
/// newest first.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, ApiError> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let repo = ctx.collaborators.clone();
    let result = web::block(move || repo.list(user.id, page, per_page)).await??;
    Ok(HttpResponse::Ok().json(result))
}
