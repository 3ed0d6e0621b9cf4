use actix_web::{web, HttpResponse, Responder};

use crate::auth::AuthedUser;
use crate::context::AppContext;
use crate::error::ApiError;

/// `GET /api/auth/me` — the authenticated manager's account.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
) -> Result<impl Responder, ApiError> {
    let users = ctx.users.clone();
    let found = web::block(move || users.find_by_id(user.id)).await??;
    match found {
        Some(account) => Ok(HttpResponse::Ok().json(account)),
        None => Err(ApiError::Unauthorized("account no longer exists".to_string())),
    }
}
