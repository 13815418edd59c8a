//! Traits shared by the document kinds.

use serde_json::Value;

use super::common::format_br_date;
use super::context::Context;
use super::validation::{
    validate_iso_date, validate_present, validate_required, ValidationError, ValidationErrors,
};
use super::{DocumentError, GeneratedDocument};

/// Trait for validating decoded request objects.
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// One request field: payload name, template key, submitted value.
pub type RequestField<'a> = (&'static str, &'static str, &'a str);

/// A request that can be turned into a substitution context.
pub trait DocumentRequest: serde::de::DeserializeOwned + Sized {
    /// Payload fields that must be present and non-blank.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Payload field holding the ISO date rendered as `DD/MM/YYYY`.
    const DATE_FIELD: &'static str = "data";

    /// Check presence on the raw payload, then decode and validate it.
    fn from_payload(payload: Value) -> Result<Self, ValidationErrors> {
        validate_present(&payload, Self::REQUIRED_FIELDS)?;
        let request: Self =
            serde_json::from_value(payload).map_err(ValidationError::invalid_payload)?;
        request.validate()?;
        Ok(request)
    }

    fn fields(&self) -> Vec<RequestField<'_>>;

    fn context(&self) -> Result<Context, ValidationErrors> {
        let mut context = Context::default();
        for (field, key, value) in self.fields() {
            if field == Self::DATE_FIELD {
                let date = format_br_date(value)
                    .map_err(|_| ValidationError::invalid_date(field, value))?;
                context.insert(key, date);
            } else {
                context.insert(key, value.trim());
            }
        }
        Ok(context)
    }

    fn output_filename(&self) -> String;
}

impl<R: DocumentRequest> Validator for R {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, _, value) in self.fields() {
            validate_required(value, field, &mut errors);
            if field == R::DATE_FIELD {
                validate_iso_date(value, field, &mut errors);
            }
        }
        errors.into_result()
    }
}

/// Trait for document generators.
pub trait Generator<Req> {
    fn generate(&self, request: Req) -> Result<GeneratedDocument, DocumentError>;
}
