use std::path::PathBuf;

use chrono::Utc;
use common::model::user::User;
use rusqlite::{params, Connection, OptionalExtension};

use super::RepoError;

pub trait UserRepo: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    /// Returns the user together with the stored password hash, for login.
    fn find_by_email(&self, email: &str) -> Result<Option<(User, String)>, RepoError>;

    fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<User, RepoError>;
}

pub struct SqliteUserRepo {
    db_path: PathBuf,
}

impl SqliteUserRepo {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn conn(&self) -> Result<Connection, RepoError> {
        Ok(Connection::open(&self.db_path)?)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl UserRepo for SqliteUserRepo {
    fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, name, email, created_at FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<(User, String)>, RepoError> {
        let conn = self.conn()?;
        let found = conn
            .query_row(
                "SELECT id, name, email, created_at, password_hash
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let user = User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        created_at: row.get(3)?,
                    };
                    Ok((user, row.get::<_, String>(4)?))
                },
            )
            .optional()?;
        Ok(found)
    }

    fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<User, RepoError> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO users (name, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, email, password_hash, now],
        )
        .map_err(|e| RepoError::from_sqlite(e, "user email"))?;

        let id = conn.last_insert_rowid();
        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
        })
    }
}
