use serde::{Deserialize, Serialize};

/// A manager account. The password hash never leaves the backend; this is
/// the shape returned by `/api/auth/me` and the user creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}
