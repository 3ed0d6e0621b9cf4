use std::path::PathBuf;

use chrono::Utc;
use common::model::collaborator::{Collaborator, CollaboratorPage, NewCollaborator};
use rusqlite::{params, Connection, OptionalExtension};

use super::RepoError;

/// Storage contract for collaborator records. Every read and write except
/// `bulk_insert` is scoped to the owning manager's `user_id`; crossing that
/// scope is a `NotFound`, never a leak of another owner's data.
pub trait CollaboratorRepo: Send + Sync {
    fn list(&self, user_id: i64, page: u32, per_page: u32) -> Result<CollaboratorPage, RepoError>;

    fn find_for_user(&self, user_id: i64, id: i64) -> Result<Collaborator, RepoError>;

    fn exists_for_user(&self, user_id: i64, id: i64) -> Result<bool, RepoError>;

    fn create(&self, new: &NewCollaborator) -> Result<Collaborator, RepoError>;

    /// Replaces every mutable column of an existing record. `user_id` is
    /// never updated.
    fn update(&self, id: i64, new: &NewCollaborator) -> Result<Collaborator, RepoError>;

    fn delete(&self, user_id: i64, id: i64) -> Result<(), RepoError>;

    /// Inserts a batch in one transaction, attaching identical timestamps
    /// to every row, and returns the count actually inserted. Rows that
    /// violate a uniqueness constraint (duplicate cpf, duplicate email per
    /// owner) are dropped individually; they reduce the returned count but
    /// never fail the batch. A connection or SQL failure fails the whole
    /// call.
    fn bulk_insert(&self, rows: &[NewCollaborator]) -> Result<usize, RepoError>;
}

pub struct SqliteCollaboratorRepo {
    db_path: PathBuf,
}

impl SqliteCollaboratorRepo {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn conn(&self) -> Result<Connection, RepoError> {
        Ok(Connection::open(&self.db_path)?)
    }
}

const COLUMNS: &str = "id, user_id, name, email, cpf, city, state, phone, created_at, updated_at";

fn row_to_collaborator(row: &rusqlite::Row<'_>) -> Result<Collaborator, rusqlite::Error> {
    Ok(Collaborator {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        cpf: row.get(4)?,
        city: row.get(5)?,
        state: row.get(6)?,
        phone: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl CollaboratorRepo for SqliteCollaboratorRepo {
    fn list(&self, user_id: i64, page: u32, per_page: u32) -> Result<CollaboratorPage, RepoError> {
        let conn = self.conn()?;
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let offset = (page - 1) as i64 * per_page as i64;

        let total: u64 = conn.query_row(
            "SELECT COUNT(*) FROM collaborators WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, i64>(0),
        )? as u64;

        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM collaborators
             WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2 OFFSET ?3"
        ))?;
        let data = stmt
            .query_map(params![user_id, per_page, offset], row_to_collaborator)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CollaboratorPage {
            data,
            page,
            per_page,
            total,
        })
    }

    fn find_for_user(&self, user_id: i64, id: i64) -> Result<Collaborator, RepoError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM collaborators WHERE user_id = ?1 AND id = ?2"),
            params![user_id, id],
            row_to_collaborator,
        )
        .optional()?
        .ok_or(RepoError::NotFound)
    }

    fn exists_for_user(&self, user_id: i64, id: i64) -> Result<bool, RepoError> {
        let conn = self.conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM collaborators WHERE user_id = ?1 AND id = ?2",
                params![user_id, id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn create(&self, new: &NewCollaborator) -> Result<Collaborator, RepoError> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO collaborators
                 (user_id, name, email, cpf, city, state, phone, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                new.user_id,
                new.name,
                new.email,
                new.cpf,
                new.city,
                new.state,
                new.phone,
                now
            ],
        )
        .map_err(|e| RepoError::from_sqlite(e, "collaborator cpf or email"))?;

        self.find_for_user(new.user_id, conn.last_insert_rowid())
    }

    fn update(&self, id: i64, new: &NewCollaborator) -> Result<Collaborator, RepoError> {
        let conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let changed = conn
            .execute(
                "UPDATE collaborators
                 SET name = ?1, email = ?2, cpf = ?3, city = ?4, state = ?5,
                     phone = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    new.name, new.email, new.cpf, new.city, new.state, new.phone, now, id
                ],
            )
            .map_err(|e| RepoError::from_sqlite(e, "collaborator cpf or email"))?;

        if changed == 0 {
            return Err(RepoError::NotFound);
        }
        self.find_for_user(new.user_id, id)
    }

    fn delete(&self, user_id: i64, id: i64) -> Result<(), RepoError> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM collaborators WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        if deleted == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn bulk_insert(&self, rows: &[NewCollaborator]) -> Result<usize, RepoError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO collaborators
                     (user_id, name, email, cpf, city, state, phone, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            )?;
            for row in rows {
                inserted += stmt.execute(params![
                    row.user_id,
                    row.name,
                    row.email,
                    row.cpf,
                    row.city,
                    row.state,
                    row.phone,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_repo() -> (tempfile::TempDir, SqliteCollaboratorRepo) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        db::init(&path).unwrap();
        (dir, SqliteCollaboratorRepo::new(path))
    }

    fn sample(user_id: i64, cpf: &str, email: &str) -> NewCollaborator {
        NewCollaborator {
            user_id,
            name: "Alice".to_string(),
            email: email.to_string(),
            cpf: cpf.to_string(),
            city: "Osasco".to_string(),
            state: "São Paulo".to_string(),
            phone: None,
        }
    }

    #[test]
    fn create_list_and_scope_by_owner() {
        let (_dir, repo) = test_repo();
        repo.create(&sample(1, "11111111111", "a@x.com")).unwrap();
        repo.create(&sample(1, "22222222222", "b@x.com")).unwrap();
        repo.create(&sample(2, "33333333333", "c@x.com")).unwrap();

        let page = repo.list(1, 1, 15).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.data.len(), 2);
        // newest first
        assert!(page.data[0].id > page.data[1].id);

        let other = repo.list(2, 1, 15).unwrap();
        assert_eq!(other.total, 1);
    }

    #[test]
    fn find_never_crosses_owner() {
        let (_dir, repo) = test_repo();
        let created = repo.create(&sample(1, "11111111111", "a@x.com")).unwrap();
        assert!(repo.find_for_user(1, created.id).is_ok());
        assert!(matches!(
            repo.find_for_user(2, created.id),
            Err(RepoError::NotFound)
        ));
        assert!(!repo.exists_for_user(2, created.id).unwrap());
    }

    #[test]
    fn duplicate_cpf_is_conflict() {
        let (_dir, repo) = test_repo();
        repo.create(&sample(1, "11111111111", "a@x.com")).unwrap();
        assert!(matches!(
            repo.create(&sample(2, "11111111111", "b@x.com")),
            Err(RepoError::Conflict(_))
        ));
    }

    #[test]
    fn update_and_delete() {
        let (_dir, repo) = test_repo();
        let created = repo.create(&sample(1, "11111111111", "a@x.com")).unwrap();

        let mut changed = sample(1, "11111111111", "novo@x.com");
        changed.city = "Campinas".to_string();
        let updated = repo.update(created.id, &changed).unwrap();
        assert_eq!(updated.email, "novo@x.com");
        assert_eq!(updated.city, "Campinas");

        repo.delete(1, created.id).unwrap();
        assert!(matches!(
            repo.delete(1, created.id),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn bulk_insert_drops_conflicting_rows() {
        let (_dir, repo) = test_repo();
        let rows = vec![
            sample(1, "11111111111", "a@x.com"),
            sample(1, "22222222222", "b@x.com"),
            // duplicate cpf within the batch
            sample(1, "11111111111", "c@x.com"),
        ];
        let inserted = repo.bulk_insert(&rows).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(repo.list(1, 1, 15).unwrap().total, 2);
    }

    #[test]
    fn bulk_insert_empty_is_noop() {
        let (_dir, repo) = test_repo();
        assert_eq!(repo.bulk_insert(&[]).unwrap(), 0);
    }
}
