//! Input validation for document requests.
//!
//! Presence checks run on the raw JSON payload so that every missing field
//! can be reported at once, before any typed decoding happens.

use serde_json::Value;
use std::fmt;

use super::common::format_br_date;

pub const MISSING_FIELDS_MESSAGE: &str = "Campos obrigatórios faltando";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Missing,
    Invalid,
}

/// Validation error with a user-facing message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Portuguese
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: ValidationKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
            kind,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for an absent or empty required field
    pub fn empty_field(field: &str) -> Self {
        Self::new(
            field,
            format!("Campo '{}' é obrigatório", field),
            ValidationKind::Missing,
        )
    }

    /// Create error for a date that is not `YYYY-MM-DD`
    pub fn invalid_date(field: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("Data '{}' inválida", value),
            ValidationKind::Invalid,
        )
        .with_suggestion("Use o formato AAAA-MM-DD, por exemplo 2024-10-25")
    }

    /// Create error for a payload that could not be decoded
    pub fn invalid_payload(detail: impl fmt::Display) -> Self {
        Self::new(
            "body",
            format!("Dados da requisição inválidos: {}", detail),
            ValidationKind::Invalid,
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Names of the required fields that were absent or empty, in check order.
    pub fn missing_fields(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter(|e| e.kind == ValidationKind::Missing)
            .map(|e| e.field.clone())
            .collect()
    }

    /// One-line message for the `error` field of the response.
    pub fn summary(&self) -> String {
        if !self.missing_fields().is_empty() {
            return MISSING_FIELDS_MESSAGE.to_string();
        }
        self.errors
            .iter()
            .map(|e| match &e.suggestion {
                Some(suggestion) => format!("{}. {}", e.message, suggestion),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Ok if no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// A value counts as absent when it is null, false, zero, blank text, or an
/// empty array or object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Required fields that are absent or blank in `payload`, in `required` order.
///
/// A payload that is not a JSON object is missing every field.
pub fn missing_fields(payload: &Value, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| payload.get(**field).map_or(true, is_blank))
        .map(|field| field.to_string())
        .collect()
}

/// Presence check over the raw payload.
pub fn validate_present(payload: &Value, required: &[&str]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for field in missing_fields(payload, required) {
        errors.add(ValidationError::empty_field(&field));
    }
    errors.into_result()
}

/// Validate that a decoded string is not empty after trimming
pub fn validate_required(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field));
    }
}

/// Validate an ISO `YYYY-MM-DD` date; blank values are left to `validate_required`
pub fn validate_iso_date(value: &str, field: &str, errors: &mut ValidationErrors) {
    if !value.trim().is_empty() && format_br_date(value).is_err() {
        errors.add(ValidationError::invalid_date(field, value));
    }
}
