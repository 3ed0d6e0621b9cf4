pub mod auth;
pub mod collaborators;
pub mod users;
