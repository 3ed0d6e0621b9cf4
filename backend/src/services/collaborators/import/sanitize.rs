//! Per-row extraction and cleanup.
//!
//! Classification only: a bad row is a skip with a reason, never a hard
//! failure, so a file with scattered defects still imports everything else.

use common::model::collaborator::NewCollaborator;
use csv::StringRecord;

use super::header::HeaderMap;
use super::states;

/// Outcome of sanitizing one raw CSV row.
#[derive(Debug)]
pub enum RowOutcome {
    /// Fully populated row, ready for batching.
    Row(NewCollaborator),
    /// One or more required fields missing after sanitization.
    Skip { missing: Vec<&'static str> },
    /// Every cell blank; invisible to the accounting.
    Blank,
}

/// Collapses internal whitespace runs to single spaces and trims.
pub(crate) fn squish(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips everything but ascii digits.
pub(crate) fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn cell<'r>(record: &'r StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| record.get(i))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Extracts and cleans one row under the header mapping.
///
/// Name and city are trimmed, the email lowercased, the CPF reduced to
/// digits and the state run through the normalizer. Phone is never sourced
/// from CSV. Required-field presence is checked after sanitization; the
/// reported field names keep the canonical order.
pub fn sanitize_row(record: &StringRecord, map: &HeaderMap, user_id: i64) -> RowOutcome {
    if record.iter().all(|f| f.trim().is_empty()) {
        return RowOutcome::Blank;
    }

    let name = cell(record, map.name).map(|v| squish(v)).and_then(non_empty);
    let email = cell(record, map.email)
        .map(|v| v.trim().to_lowercase())
        .and_then(non_empty);
    let cpf = cell(record, map.cpf)
        .map(|v| digits_only(v))
        .and_then(non_empty);
    let city = cell(record, map.city).map(|v| squish(v)).and_then(non_empty);
    let state = cell(record, map.state).and_then(|v| states::normalize_state(v));

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if email.is_none() {
        missing.push("email");
    }
    if cpf.is_none() {
        missing.push("cpf");
    }
    if city.is_none() {
        missing.push("city");
    }
    if state.is_none() {
        missing.push("state");
    }
    if !missing.is_empty() {
        return RowOutcome::Skip { missing };
    }

    RowOutcome::Row(NewCollaborator {
        user_id,
        name: name.unwrap(),
        email: email.unwrap(),
        cpf: cpf.unwrap(),
        city: city.unwrap(),
        state: state.unwrap(),
        phone: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::collaborators::import::header::map_header;

    fn default_map() -> HeaderMap {
        map_header(["name", "email", "cpf", "city", "state"])
    }

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn valid_row_is_sanitized() {
        let rec = record(&[
            "  Alice   Souza ",
            " Alice@X.COM ",
            "123.456.789-01",
            " São Paulo ",
            "sp",
        ]);
        match sanitize_row(&rec, &default_map(), 7) {
            RowOutcome::Row(row) => {
                assert_eq!(row.user_id, 7);
                assert_eq!(row.name, "Alice Souza");
                assert_eq!(row.email, "alice@x.com");
                assert_eq!(row.cpf, "12345678901");
                assert_eq!(row.city, "São Paulo");
                assert_eq!(row.state, "São Paulo");
                assert_eq!(row.phone, None);
            }
            other => panic!("expected valid row, got {:?}", other),
        }
    }

    #[test]
    fn missing_cpf_is_a_skip_naming_the_field() {
        let rec = record(&["Alice", "alice@x.com", "", "Osasco", "SP"]);
        match sanitize_row(&rec, &default_map(), 1) {
            RowOutcome::Skip { missing } => assert_eq!(missing, vec!["cpf"]),
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn cpf_with_no_digits_is_missing() {
        let rec = record(&["Alice", "alice@x.com", "n/a", "Osasco", "SP"]);
        assert!(matches!(
            sanitize_row(&rec, &default_map(), 1),
            RowOutcome::Skip { .. }
        ));
    }

    #[test]
    fn short_row_reports_out_of_range_fields() {
        let rec = record(&["Alice", "alice@x.com"]);
        match sanitize_row(&rec, &default_map(), 1) {
            RowOutcome::Skip { missing } => assert_eq!(missing, vec!["cpf", "city", "state"]),
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn blank_row_is_invisible() {
        let rec = record(&["", "  ", "", "", ""]);
        assert!(matches!(
            sanitize_row(&rec, &default_map(), 1),
            RowOutcome::Blank
        ));
    }

    #[test]
    fn phone_is_never_sourced_from_csv() {
        let map = map_header(["name", "email", "cpf", "city", "state", "phone"]);
        let rec = record(&[
            "Alice",
            "alice@x.com",
            "12345678901",
            "Osasco",
            "SP",
            "11999990001",
        ]);
        match sanitize_row(&rec, &map, 1) {
            RowOutcome::Row(row) => assert_eq!(row.phone, None),
            other => panic!("expected valid row, got {:?}", other),
        }
    }
}
