//! Actix extractor for the authenticated manager.
//!
//! Any handler taking an `AuthedUser` parameter requires a valid bearer
//! token; extraction fails with `401` otherwise. Only the token subject is
//! extracted here, user details are loaded from the repository by the
//! handlers that need them.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::jwt::{self, AuthError};
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    pub id: i64,
}

fn authenticate(req: &HttpRequest) -> Result<AuthedUser, AuthError> {
    let ctx = req
        .app_data::<web::Data<AppContext>>()
        .ok_or(AuthError::InvalidToken)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = jwt::bearer_token(header)?;
    let claims = jwt::decode_token(token, &ctx.config.jwt_secret)?;
    Ok(AuthedUser { id: claims.sub })
}

impl FromRequest for AuthedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(|e| ApiError::Unauthorized(e.to_string())))
    }
}
