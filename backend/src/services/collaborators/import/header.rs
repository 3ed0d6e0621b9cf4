//! Header mapping for imported CSV files.
//!
//! The first line of an upload names its columns with whatever headings the
//! source system produced ("nome", "E-mail", "Município"...). This module
//! resolves those headings to the five canonical fields once per import;
//! the mapping is immutable afterwards. If any required field is missing
//! the whole import is rejected before a single row is read.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const NAME_SYNONYMS: &[&str] = &["name", "nome", "fullname", "full_name"];
const EMAIL_SYNONYMS: &[&str] = &["email", "e-mail", "mail", "emailaddress"];
const CPF_SYNONYMS: &[&str] = &["cpf"];
const CITY_SYNONYMS: &[&str] = &["city", "cidade", "municipio", "município"];
const STATE_SYNONYMS: &[&str] = &["state", "estado"];

/// Canonical field name to column index, or `None` when the header does not
/// carry that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    pub name: Option<usize>,
    pub email: Option<usize>,
    pub cpf: Option<usize>,
    pub city: Option<usize>,
    pub state: Option<usize>,
}

impl HeaderMap {
    /// Required fields absent from the header, in canonical order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.is_none() {
            out.push("name");
        }
        if self.email.is_none() {
            out.push("email");
        }
        if self.cpf.is_none() {
            out.push("cpf");
        }
        if self.city.is_none() {
            out.push("city");
        }
        if self.state.is_none() {
            out.push("state");
        }
        out
    }
}

/// Folds a header cell for comparison: decompose, drop combining marks,
/// lowercase, keep only ascii alphanumerics. "E-mail " and "email" collapse
/// to the same token, as do "Município" and "municipio".
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn index_of(normalized: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        let needle = normalize_token(candidate);
        if let Some(i) = normalized.iter().position(|h| *h == needle) {
            return Some(i);
        }
    }
    None
}

/// Resolves column positions for the canonical fields. Pure function of the
/// header row; first matching synonym wins.
pub fn map_header<I, S>(header: I) -> HeaderMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized: Vec<String> = header
        .into_iter()
        .map(|cell| normalize_token(cell.as_ref()))
        .collect();

    HeaderMap {
        name: index_of(&normalized, NAME_SYNONYMS),
        email: index_of(&normalized, EMAIL_SYNONYMS),
        cpf: index_of(&normalized, CPF_SYNONYMS),
        city: index_of(&normalized, CITY_SYNONYMS),
        state: index_of(&normalized, STATE_SYNONYMS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_and_portuguese_headers_are_equivalent() {
        let english = map_header(["name", "email", "cpf", "city", "state"]);
        let portuguese = map_header(["nome", "e-mail", "cpf", "cidade", "estado"]);
        assert_eq!(english, portuguese);
        assert_eq!(english.name, Some(0));
        assert_eq!(english.email, Some(1));
        assert_eq!(english.cpf, Some(2));
        assert_eq!(english.city, Some(3));
        assert_eq!(english.state, Some(4));
    }

    #[test]
    fn case_and_diacritics_are_ignored() {
        let map = map_header(["NOME", "E-Mail", "CPF", "Município", "Estado"]);
        assert!(map.missing().is_empty());
        assert_eq!(map.city, Some(3));
    }

    #[test]
    fn extra_columns_do_not_shift_the_mapping() {
        let map = map_header(["phone", "name", "email", "cpf", "city", "state"]);
        assert_eq!(map.name, Some(1));
        assert_eq!(map.state, Some(5));
    }

    #[test]
    fn missing_lists_absent_fields_in_order() {
        let map = map_header(["name", "email"]);
        assert_eq!(map.missing(), vec!["cpf", "city", "state"]);
    }

    #[test]
    fn first_synonym_match_wins() {
        // both "email" and "mail" present: first matching synonym resolves
        let map = map_header(["mail", "email"]);
        assert_eq!(map.email, Some(1));
    }

    #[test]
    fn token_normalization() {
        assert_eq!(normalize_token(" Full_Name "), "fullname");
        assert_eq!(normalize_token("Município"), "municipio");
        assert_eq!(normalize_token("E-MAIL"), "email");
    }
}
