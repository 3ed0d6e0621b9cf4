use actix_web::{HttpResponse, Responder};

use crate::auth::AuthedUser;

/// `POST /api/auth/logout` — stateless acknowledgement; the token simply
/// expires on its own.
pub(crate) async fn process(_user: AuthedUser) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "logged out" }))
}
