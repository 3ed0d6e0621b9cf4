use serde::{Deserialize, Serialize};

/// Credentials for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Full collaborator payload, used by `POST` and `PUT`. The backend
/// sanitizes every field before validation (trimming, lowercasing the
/// email, stripping non-digits from cpf/phone, expanding the state to its
/// full name), so callers may send e.g. "SP" or "sao paulo" for `state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorPayload {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial collaborator payload for `PATCH`; absent fields are left as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Pagination query for the collaborator listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
