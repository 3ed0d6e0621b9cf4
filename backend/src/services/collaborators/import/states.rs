//! Canonicalization of Brazilian state names.
//!
//! A single storage column holds full state names, while input arrives as
//! two-letter UF codes, accented or unaccented full names, in any casing.
//! This is the single point of truth for that conversion: both the manual
//! create/update payload sanitizer and the CSV import pipeline go through
//! `normalize_state`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// UF code to full official name, 26 states plus the federal district.
const STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

/// Slug used for full-name comparison: diacritics stripped, lowercased,
/// non-alphanumeric runs collapsed to a single hyphen.
fn slug(value: &str) -> String {
    let folded: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut out = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a free-form state token to the canonical full name.
///
/// Empty input is `None` (the required-field check upstream deals with it).
/// A recognized two-letter code expands to the full name; an unrecognized
/// code passes through unchanged. Full names match diacritic- and
/// case-insensitively. Anything else falls back to a title-cased copy of
/// the input, best effort, not validated against the known set.
pub fn normalize_state(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        let uf = trimmed.to_ascii_uppercase();
        return Some(
            STATES
                .iter()
                .find(|(code, _)| *code == uf)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| trimmed.to_string()),
        );
    }

    let needle = slug(trimmed);
    for (_, full) in STATES {
        if needle == slug(full) {
            return Some(full.to_string());
        }
    }

    Some(title_case(trimmed))
}
