use serde::{Deserialize, Serialize};

/// A collaborator record as persisted and returned by the API.
///
/// Every collaborator belongs to exactly one manager account (`user_id`);
/// all reads and writes are scoped to that owner. `cpf` holds the 11-digit
/// Brazilian taxpayer id, digits only, and is globally unique. `state`
/// stores the full state name (e.g. "São Paulo"), never the two-letter code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for a collaborator, produced either by the manual create
/// endpoint (after payload sanitization) or by the CSV import pipeline's
/// row sanitizer. Timestamps are attached by the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollaborator {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
}

/// One page of collaborators, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorPage {
    pub data: Vec<Collaborator>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}
