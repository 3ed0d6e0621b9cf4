use actix_web::{web, HttpResponse, Responder};

use crate::auth::{jwt, AuthedUser};
use crate::context::AppContext;
use crate::error::ApiError;

/// `POST /api/auth/refresh` — issues a fresh token for the same subject,
/// restarting the TTL.
pub(crate) async fn process(
    user: AuthedUser,
    ctx: web::Data<AppContext>,
) -> Result<impl Responder, ApiError> {
    let token = jwt::issue_token(user.id, &ctx.config.jwt_secret, ctx.config.jwt_ttl_minutes)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": ctx.config.jwt_ttl_minutes * 60,
    })))
}
