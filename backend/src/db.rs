//! SQLite schema management. The backend opens short-lived connections per
//! operation (see `repository`); this module only prepares the schema once
//! at startup.

use rusqlite::Connection;
use std::path::Path;

/// Creates the tables and indexes if they do not exist yet.
///
/// Uniqueness rules enforced here, not in application code:
/// - `users.email` is unique;
/// - `collaborators.cpf` is globally unique;
/// - `collaborators.(user_id, email)` is unique per owner.
pub fn init(path: &Path) -> Result<(), rusqlite::Error> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS collaborators (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            name       TEXT NOT NULL,
            email      TEXT NOT NULL,
            cpf        TEXT NOT NULL,
            city       TEXT NOT NULL,
            state      TEXT NOT NULL,
            phone      TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_collaborators_cpf
            ON collaborators (cpf);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_collaborators_user_email
            ON collaborators (user_id, email);
        CREATE INDEX IF NOT EXISTS idx_collaborators_user
            ON collaborators (user_id);",
    )
}
