//! Sanitization and validation of manual create/update payloads.
//!
//! Mirrors the CSV row sanitizer field by field (trim/squish name and city,
//! lowercase the email, digits-only cpf and phone) and goes through the
//! same state normalizer, so a record entered by hand and one imported
//! from CSV end up in identical shape.

use common::model::collaborator::NewCollaborator;
use common::requests::{CollaboratorPayload, CollaboratorPatch};

use super::import::sanitize::{digits_only, squish};
use super::import::states;
use crate::error::ApiError;

const NAME_MAX: usize = 150;
const EMAIL_MAX: usize = 150;
const CITY_MAX: usize = 120;
const PHONE_MAX: usize = 30;

fn validate_name(raw: &str) -> Result<String, ApiError> {
    let name = squish(raw);
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if name.chars().count() > NAME_MAX {
        return Err(ApiError::Validation("name is too long".to_string()));
    }
    Ok(name)
}

fn validate_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::Validation("email is required".to_string()));
    }
    if email.chars().count() > EMAIL_MAX || !email.contains('@') || !email.contains('.') {
        return Err(ApiError::Validation("email is invalid".to_string()));
    }
    Ok(email)
}

fn validate_cpf(raw: &str) -> Result<String, ApiError> {
    let cpf = digits_only(raw);
    if cpf.len() != 11 {
        return Err(ApiError::Validation(
            "cpf must contain exactly 11 digits".to_string(),
        ));
    }
    Ok(cpf)
}

fn validate_city(raw: &str) -> Result<String, ApiError> {
    let city = squish(raw);
    if city.is_empty() {
        return Err(ApiError::Validation("city is required".to_string()));
    }
    if city.chars().count() > CITY_MAX {
        return Err(ApiError::Validation("city is too long".to_string()));
    }
    Ok(city)
}

fn validate_state(raw: &str) -> Result<String, ApiError> {
    states::normalize_state(raw).ok_or_else(|| ApiError::Validation("state is required".to_string()))
}

fn validate_phone(raw: &str) -> Result<Option<String>, ApiError> {
    let phone = digits_only(raw);
    if phone.is_empty() {
        return Ok(None);
    }
    if phone.len() > PHONE_MAX {
        return Err(ApiError::Validation("phone is too long".to_string()));
    }
    Ok(Some(phone))
}

/// Builds a full insert payload from a store/put request body.
pub fn sanitize_payload(user_id: i64, payload: &CollaboratorPayload) -> Result<NewCollaborator, ApiError> {
    Ok(NewCollaborator {
        user_id,
        name: validate_name(&payload.name)?,
        email: validate_email(&payload.email)?,
        cpf: validate_cpf(&payload.cpf)?,
        city: validate_city(&payload.city)?,
        state: validate_state(&payload.state)?,
        phone: match &payload.phone {
            Some(raw) => validate_phone(raw)?,
            None => None,
        },
    })
}

/// Merges a partial patch over the current record, validating only the
/// fields present.
pub fn apply_patch(
    current: &common::model::collaborator::Collaborator,
    patch: &CollaboratorPatch,
) -> Result<NewCollaborator, ApiError> {
    Ok(NewCollaborator {
        user_id: current.user_id,
        name: match &patch.name {
            Some(raw) => validate_name(raw)?,
            None => current.name.clone(),
        },
        email: match &patch.email {
            Some(raw) => validate_email(raw)?,
            None => current.email.clone(),
        },
        cpf: match &patch.cpf {
            Some(raw) => validate_cpf(raw)?,
            None => current.cpf.clone(),
        },
        city: match &patch.city {
            Some(raw) => validate_city(raw)?,
            None => current.city.clone(),
        },
        state: match &patch.state {
            Some(raw) => validate_state(raw)?,
            None => current.state.clone(),
        },
        phone: match &patch.phone {
            Some(raw) => validate_phone(raw)?,
            None => current.phone.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::collaborator::Collaborator;

    fn payload() -> CollaboratorPayload {
        CollaboratorPayload {
            name: "  Alice   Souza ".to_string(),
            email: " Alice@X.COM ".to_string(),
            cpf: "123.456.789-01".to_string(),
            city: " Osasco ".to_string(),
            state: "sp".to_string(),
            phone: Some("(11) 99999-0001".to_string()),
        }
    }

    #[test]
    fn store_payload_is_sanitized_like_an_import_row() {
        let row = sanitize_payload(3, &payload()).unwrap();
        assert_eq!(row.user_id, 3);
        assert_eq!(row.name, "Alice Souza");
        assert_eq!(row.email, "alice@x.com");
        assert_eq!(row.cpf, "12345678901");
        assert_eq!(row.state, "São Paulo");
        assert_eq!(row.phone.as_deref(), Some("11999990001"));
    }

    #[test]
    fn cpf_must_have_eleven_digits() {
        let mut p = payload();
        p.cpf = "123".to_string();
        assert!(matches!(
            sanitize_payload(1, &p),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn email_needs_at_and_dot() {
        let mut p = payload();
        p.email = "not-an-email".to_string();
        assert!(sanitize_payload(1, &p).is_err());
    }

    #[test]
    fn blank_phone_becomes_null() {
        let mut p = payload();
        p.phone = Some("  ".to_string());
        assert_eq!(sanitize_payload(1, &p).unwrap().phone, None);
    }

    fn current() -> Collaborator {
        Collaborator {
            id: 9,
            user_id: 3,
            name: "Alice Souza".to_string(),
            email: "alice@x.com".to_string(),
            cpf: "12345678901".to_string(),
            city: "Osasco".to_string(),
            state: "São Paulo".to_string(),
            phone: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let patch = CollaboratorPatch {
            city: Some("campinas".to_string()),
            state: Some("rio de janeiro".to_string()),
            ..Default::default()
        };
        let merged = apply_patch(&current(), &patch).unwrap();
        assert_eq!(merged.city, "campinas");
        assert_eq!(merged.state, "Rio de Janeiro");
        assert_eq!(merged.name, "Alice Souza");
        assert_eq!(merged.cpf, "12345678901");
    }

    #[test]
    fn patch_validates_present_fields() {
        let patch = CollaboratorPatch {
            cpf: Some("12".to_string()),
            ..Default::default()
        };
        assert!(apply_patch(&current(), &patch).is_err());
    }
}
