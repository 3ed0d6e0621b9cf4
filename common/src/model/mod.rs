pub mod collaborator;
pub mod import;
pub mod user;
