//! The import orchestrator: owns the end-to-end flow for one uploaded file.
//!
//! `Opening file -> Reading header -> Streaming rows -> Flushing final
//! batch`, with every state able to exit into a failure. The notifying step
//! lives in the async job wrapper (`super::schedule_import_job`), since the
//! summary email must not run on the blocking pool.
//!
//! Designed to run via `tokio::task::spawn_blocking`; storage arrives as an
//! injected `&dyn CollaboratorRepo` and progress leaves through a callback,
//! so the function is synchronous, deterministic and directly testable.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use common::model::collaborator::NewCollaborator;
use common::model::import::{ImportReport, RowError};
use csv::{ReaderBuilder, StringRecord};
use log::debug;

use super::header::{map_header, HeaderMap};
use super::sanitize::{sanitize_row, RowOutcome};
use crate::repository::collaborator::CollaboratorRepo;
use crate::repository::RepoError;

/// Rows per bulk insert.
pub const BATCH_SIZE: usize = 1000;

/// At most this many row-level defects are sampled into the report;
/// `skipped` always carries the full count.
pub const ERROR_SAMPLE_CAP: usize = 10;

/// Precondition and fatal failures. Row-level defects never surface here,
/// they are data in the `ImportReport`.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("file not found")]
    FileNotFound,

    #[error("file not accessible: {0}")]
    NotAccessible(String),

    #[error("empty file")]
    EmptyFile,

    #[error("invalid header: missing columns {0}")]
    InvalidHeader(String),

    #[error("storage failure: {0}")]
    Storage(#[from] RepoError),
}

fn record_line(record: &StringRecord) -> String {
    record
        .position()
        .map(|p| p.line().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn push_error(report: &mut ImportReport, line: String, reason: String) {
    if report.errors.len() < ERROR_SAMPLE_CAP {
        report.errors.push(RowError { line, reason });
    }
}

/// Flushes `buffer` through the repository, folding conflict-dropped rows
/// into the skip count.
fn flush(
    repo: &dyn CollaboratorRepo,
    buffer: &mut Vec<NewCollaborator>,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    if buffer.is_empty() {
        return Ok(());
    }
    let inserted = repo.bulk_insert(buffer)?;
    report.created += inserted as u64;
    report.skipped += (buffer.len() - inserted) as u64;
    buffer.clear();
    Ok(())
}

/// Runs one import start to finish and returns the accounting.
///
/// `on_progress` is invoked with the running created count after every
/// flushed batch. Re-running the same file is not idempotent: previously
/// imported rows resurface as uniqueness conflicts and are counted as
/// skips.
pub fn run_import(
    repo: &dyn CollaboratorRepo,
    user_id: i64,
    path: &Path,
    mut on_progress: impl FnMut(u64),
) -> Result<ImportReport, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound);
    }
    let file = File::open(path).map_err(|e| ImportError::NotAccessible(e.to_string()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = reader.records();

    // Reading header: exactly one line, BOM-tolerant.
    let header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(_)) | None => return Err(ImportError::EmptyFile),
    };
    let header_cells: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == 0 {
                cell.trim_start_matches('\u{feff}').to_string()
            } else {
                cell.to_string()
            }
        })
        .collect();
    let map: HeaderMap = map_header(&header_cells);
    let absent = map.missing();
    if !absent.is_empty() {
        return Err(ImportError::InvalidHeader(absent.join(", ")));
    }

    let mut report = ImportReport::default();
    let mut buffer: Vec<NewCollaborator> = Vec::with_capacity(BATCH_SIZE);

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                // A malformed line is a skip, not an abort; the rest of the
                // file still imports.
                report.skipped += 1;
                push_error(
                    &mut report,
                    "unknown".to_string(),
                    format!("malformed csv record: {}", e),
                );
                continue;
            }
        };

        match sanitize_row(&record, &map, user_id) {
            RowOutcome::Blank => continue,
            RowOutcome::Skip { missing } => {
                report.skipped += 1;
                push_error(
                    &mut report,
                    record_line(&record),
                    format!("missing required fields: {}", missing.join(", ")),
                );
            }
            RowOutcome::Row(row) => {
                buffer.push(row);
                if buffer.len() >= BATCH_SIZE {
                    flush(repo, &mut buffer, &mut report)?;
                    on_progress(report.created);
                }
            }
        }
    }

    flush(repo, &mut buffer, &mut report)?;

    debug!(
        "import of {:?} done: created={} skipped={}",
        path, report.created, report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::collaborator::{Collaborator, CollaboratorPage};
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records every batch it receives; insert count equals batch size.
    struct RecordingRepo {
        batches: Mutex<Vec<Vec<NewCollaborator>>>,
        fail: bool,
    }

    impl RecordingRepo {
        fn new() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn batch_sizes(&self) -> Vec<usize> {
            self.batches.lock().unwrap().iter().map(Vec::len).collect()
        }

        fn rows(&self) -> Vec<NewCollaborator> {
            self.batches.lock().unwrap().concat()
        }
    }

    impl CollaboratorRepo for RecordingRepo {
        fn list(&self, _: i64, _: u32, _: u32) -> Result<CollaboratorPage, RepoError> {
            unimplemented!()
        }
        fn find_for_user(&self, _: i64, _: i64) -> Result<Collaborator, RepoError> {
            unimplemented!()
        }
        fn exists_for_user(&self, _: i64, _: i64) -> Result<bool, RepoError> {
            unimplemented!()
        }
        fn create(&self, _: &NewCollaborator) -> Result<Collaborator, RepoError> {
            unimplemented!()
        }
        fn update(&self, _: i64, _: &NewCollaborator) -> Result<Collaborator, RepoError> {
            unimplemented!()
        }
        fn delete(&self, _: i64, _: i64) -> Result<(), RepoError> {
            unimplemented!()
        }
        fn bulk_insert(&self, rows: &[NewCollaborator]) -> Result<usize, RepoError> {
            if self.fail {
                return Err(RepoError::Sqlite(rusqlite::Error::InvalidQuery));
            }
            self.batches.lock().unwrap().push(rows.to_vec());
            Ok(rows.len())
        }
    }

    fn write_csv(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn end_to_end_two_valid_rows() {
        let (_dir, path) = write_csv(
            "name,email,cpf,city,state,phone\n\
             Alice,alice@x.com,12345678901,São Paulo,SP,11999990001\n\
             Bruno,bruno@x.com,98765432100,Osasco,Rio de Janeiro,11999990002\n",
        );
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 0);
        assert!(report.errors.is_empty());

        let rows = repo.rows();
        assert_eq!(rows[0].state, "São Paulo");
        assert_eq!(rows[1].state, "Rio de Janeiro");
        assert_eq!(rows[0].phone, None);
        assert_eq!(rows[1].phone, None);
    }

    #[test]
    fn missing_cpf_row_is_skipped_and_sampled() {
        let (_dir, path) = write_csv(
            "name,email,cpf,city,state\n\
             Alice,alice@x.com,11111111111,Osasco,SP\n\
             Bruno,bruno@x.com,,Osasco,SP\n\
             Carla,carla@x.com,22222222222,Osasco,SP\n",
        );
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].reason.contains("cpf"));
        assert_eq!(report.errors[0].line, "3");
    }

    #[test]
    fn batches_flush_at_one_thousand_rows() {
        let mut content = String::from("name,email,cpf,city,state\n");
        for i in 0..2500u64 {
            content.push_str(&format!(
                "Pessoa {i},p{i}@x.com,{:011},Osasco,SP\n",
                10000000000u64 + i
            ));
        }
        let (_dir, path) = write_csv(&content);
        let repo = RecordingRepo::new();
        let mut progress = Vec::new();
        let report = run_import(&repo, 1, &path, |created| progress.push(created)).unwrap();

        assert_eq!(repo.batch_sizes(), vec![1000, 1000, 500]);
        assert_eq!(report.created, 2500);
        assert_eq!(report.skipped, 0);
        assert_eq!(progress, vec![1000, 2000]);
    }

    #[test]
    fn error_sample_is_capped_at_ten() {
        let mut content = String::from("name,email,cpf,city,state\n");
        for i in 0..15 {
            content.push_str(&format!("Pessoa {i},p{i}@x.com,,Osasco,SP\n"));
        }
        let (_dir, path) = write_csv(&content);
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();

        assert_eq!(report.skipped, 15);
        assert_eq!(report.errors.len(), ERROR_SAMPLE_CAP);
        assert_eq!(report.created, 0);
    }

    #[test]
    fn blank_lines_are_invisible() {
        let (_dir, path) = write_csv(
            "name,email,cpf,city,state\n\
             Alice,alice@x.com,11111111111,Osasco,SP\n\
             \n\
             Bruno,bruno@x.com,22222222222,Osasco,SP\n",
        );
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn bom_on_header_is_tolerated() {
        let (_dir, path) = write_csv(
            "\u{feff}name,email,cpf,city,state\n\
             Alice,alice@x.com,11111111111,Osasco,SP\n",
        );
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();
        assert_eq!(report.created, 1);
    }

    #[test]
    fn missing_required_column_aborts_before_rows() {
        let (_dir, path) = write_csv(
            "name,email,city,state\n\
             Alice,alice@x.com,Osasco,SP\n",
        );
        let repo = RecordingRepo::new();
        match run_import(&repo, 1, &path, |_| {}) {
            Err(ImportError::InvalidHeader(missing)) => assert!(missing.contains("cpf")),
            other => panic!("expected invalid header, got {:?}", other),
        }
        assert!(repo.batch_sizes().is_empty());
    }

    #[test]
    fn empty_file_is_a_precondition_failure() {
        let (_dir, path) = write_csv("");
        let repo = RecordingRepo::new();
        assert!(matches!(
            run_import(&repo, 1, &path, |_| {}),
            Err(ImportError::EmptyFile)
        ));
    }

    #[test]
    fn missing_file_is_a_precondition_failure() {
        let repo = RecordingRepo::new();
        assert!(matches!(
            run_import(&repo, 1, Path::new("/nonexistent/import.csv"), |_| {}),
            Err(ImportError::FileNotFound)
        ));
    }

    #[test]
    fn storage_failure_aborts_the_import() {
        let (_dir, path) = write_csv(
            "name,email,cpf,city,state\n\
             Alice,alice@x.com,11111111111,Osasco,SP\n",
        );
        let repo = RecordingRepo::failing();
        assert!(matches!(
            run_import(&repo, 1, &path, |_| {}),
            Err(ImportError::Storage(_))
        ));
    }

    #[test]
    fn quoted_fields_with_embedded_commas() {
        let (_dir, path) = write_csv(
            "name,email,cpf,city,state\n\
             \"Souza, Alice\",alice@x.com,11111111111,Osasco,SP\n",
        );
        let repo = RecordingRepo::new();
        let report = run_import(&repo, 1, &path, |_| {}).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(repo.rows()[0].name, "Souza, Alice");
    }
}
