use actix_web::{web, HttpResponse, Responder};
use common::requests::LoginRequest;

use crate::auth::{jwt, password};
use crate::context::AppContext;
use crate::error::ApiError;

/// `POST /api/auth/login` — exchanges credentials for a bearer token.
/// Unknown email and wrong password are indistinguishable to the caller.
pub(crate) async fn process(
    ctx: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    let email = payload.email.trim().to_lowercase();
    let users = ctx.users.clone();
    let found = web::block(move || users.find_by_email(&email)).await??;

    let Some((user, stored_hash)) = found else {
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    };
    if !password::verify_password(&payload.password, &stored_hash) {
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    let token = jwt::issue_token(user.id, &ctx.config.jwt_secret, ctx.config.jwt_ttl_minutes)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": ctx.config.jwt_ttl_minutes * 60,
    })))
}
