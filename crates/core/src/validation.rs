//! Field validators and conversion of [`validator`] errors into
//! client-facing field messages.
//!
//! Request DTOs derive `validator::Validate` and reference the functions here
//! through `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateUrl, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{CoreError, FieldErrors};
use crate::roles;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"));

static LANGUAGE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(?:-[a-z0-9]{2,4})?$").expect("language code regex is valid")
});

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]{0,62}$").expect("identifier regex is valid"));

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Lowercase letters and digits separated by single hyphens.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            "slug",
            "must contain only lowercase letters, digits and single hyphens",
        ))
    }
}

/// E.164-ish phone number: optional `+`, then 7 to 15 digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("phone", "must be 7 to 15 digits, optionally prefixed with +"))
    }
}

/// Lowercase language tag such as `en`, `uz` or `pt-br`.
pub fn validate_language_code(value: &str) -> Result<(), ValidationError> {
    if LANGUAGE_CODE_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("language_code", "must be a lowercase language tag such as en or pt-br"))
    }
}

/// Lowercase SQL-style identifier used for translation table/field names.
pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            "identifier",
            "must start with a lowercase letter and contain only lowercase letters, digits and underscores",
        ))
    }
}

pub fn validate_role(value: &str) -> Result<(), ValidationError> {
    if roles::is_valid_role(value) {
        Ok(())
    } else {
        Err(invalid("role", "must be one of: admin, customer"))
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// Check a nullable URL patch field. Absent and explicit `null` both pass;
/// only a present value has to be a URL.
pub fn validate_nullable_url(field: &str, value: &Option<Option<String>>) -> Result<(), CoreError> {
    match value {
        Some(Some(url)) if !url.validate_url() => {
            Err(CoreError::invalid_field(field, "must be a valid URL"))
        }
        _ => Ok(()),
    }
}

/// Flatten [`ValidationErrors`] into one message per field.
///
/// Nested struct errors are reported with dotted paths (`address.city`).
/// When a field fails several rules only the first message is kept.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    out.entry(path).or_insert_with(|| describe(first));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Human-readable message for a single validation failure.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match error.code.as_ref() {
        "length" => match (param("min"), param("max"), param("equal")) {
            (_, _, Some(eq)) => format!("must be exactly {eq} characters long"),
            (Some(min), Some(max), _) => format!("must be between {min} and {max} characters long"),
            (Some(min), None, _) => format!("must be at least {min} characters long"),
            (None, Some(max), _) => format!("must be at most {max} characters long"),
            _ => "has an invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            _ => "is out of range".to_string(),
        },
        "email" => "must be a valid email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "required" => "is required".to_string(),
        _ => "is invalid".to_string(),
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(field_errors(&errors))
    }
}
