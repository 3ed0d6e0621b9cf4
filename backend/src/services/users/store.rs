use actix_web::{web, HttpResponse, Responder};
use common::requests::CreateUserRequest;

use crate::auth::{password, AuthedUser};
use crate::context::AppContext;
use crate::error::ApiError;

const PASSWORD_MIN: usize = 8;

/// `POST /api/users` — provisions a new manager account.
pub(crate) async fn process(
    _user: AuthedUser,
    ctx: web::Data<AppContext>,
    payload: web::Json<CreateUserRequest>,
) -> Result<impl Responder, ApiError> {
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(ApiError::Validation("email is invalid".to_string()));
    }
    if payload.password.chars().count() < PASSWORD_MIN {
        return Err(ApiError::Validation(
            "password must have at least 8 characters".to_string(),
        ));
    }

    let hash = password::hash_password(&payload.password);
    let users = ctx.users.clone();
    let created = web::block(move || users.create(&name, &email, &hash)).await??;
    Ok(HttpResponse::Created().json(created))
}
