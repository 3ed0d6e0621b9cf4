//! Authentication endpoints.
//!
//! `login` is public; `me`, `refresh` and `logout` require a valid bearer
//! token (enforced by the `AuthedUser` extractor). Tokens are stateless:
//! logout only acknowledges, there is no server-side revocation list.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod login;
mod logout;
mod me;
mod refresh;

const API_PATH: &str = "/api/auth";

/// Configures and returns the Actix scope for authentication routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/me", get().to(me::process))
        .route("/refresh", post().to(refresh::process))
        .route("/logout", post().to(logout::process))
}
