//! Manager account endpoints. Creation is itself behind authentication:
//! only an existing manager can provision a new account.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod store;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(store::process))
}
