//! Validation error types and the axum extractor for validated input
//!
//! This module provides `ValidatedJson<T>` - a drop-in replacement for `Json<T>`
//! that deserializes the payload and runs it through its validator before the
//! handler sees it.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use super::validators::{Checked, Violation};

/// Kind of rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    TooShort,
    TooLong,
    FormatInvalid,
    Required,
    NotPositiveInteger,
    LocalePhoneInvalid,
    InvalidBody,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::FormatInvalid => "format_invalid",
            ErrorCode::Required => "required",
            ErrorCode::NotPositiveInteger => "not_positive_integer",
            ErrorCode::LocalePhoneInvalid => "locale_phone_invalid",
            ErrorCode::InvalidBody => "invalid_body",
        };
        f.write_str(code)
    }
}

/// A field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    fn from_violation(field: &str, violation: Violation) -> Self {
        Self::new(field, violation.code, violation.message)
    }
}

/// A non-empty set of field errors.
///
/// Errors keep the order in which the fields were checked, so callers that
/// render them inline see them in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns `None` when `errors` is empty.
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn single(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, code, message)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Names of the failing fields, deduplicated, in check order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(error.field.as_str());
            }
        }
        fields
    }

    /// Whether `field` failed with `code`
    pub fn has(&self, field: &str, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.field == field && e.code == code)
    }

    /// Messages grouped by field name
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        map
    }

    fn summary(&self) -> String {
        let fields = self.fields();
        if fields.len() == 1 {
            format!("Validation failed for field '{}'", fields[0])
        } else {
            format!("Validation failed for {} fields", fields.len())
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub fields: BTreeMap<String, Vec<String>>,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(errors: ValidationErrors) -> Self {
        Self {
            error: "ValidationError".to_string(),
            message: errors.summary(),
            fields: errors.by_field(),
            errors: errors.into_errors(),
            code: StatusCode::BAD_REQUEST.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        let response = ValidationErrorResponse::new(self);
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    }
}

/// Trait for raw input types that validate into a typed, normalized value
pub trait Validatable {
    type Validated;

    fn validate(&self) -> Result<Self::Validated, ValidationErrors>;
}

/// Custom JSON extractor that validates input
///
/// Use this instead of `Json<T>` to automatically:
/// 1. Parse JSON from the request body
/// 2. Run the payload through its `Validatable` implementation
/// 3. Return a 400 listing every failing field
///
/// The handler receives the normalized value, never the raw payload.
pub struct ValidatedJson<T: Validatable>(pub T::Validated);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validatable + Send,
    T::Validated: Send,
    S: Send + Sync,
{
    type Rejection = ValidationErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        let validated = data.validate().map_err(|errors| {
            tracing::debug!(fields = ?errors.fields(), "payload rejected by validation");
            errors
        })?;

        Ok(ValidatedJson(validated))
    }
}

/// Convert JSON parsing errors to a validation error on `body`
pub fn body_rejection(err: JsonRejection) -> ValidationErrors {
    let message = match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    };
    ValidationErrors::single("body", ErrorCode::InvalidBody, message)
}

/// Builder for accumulating validation errors across fields
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Record every violation of a checked field and hand back its value
    pub fn checked<T>(&mut self, field: &str, checked: Checked<T>) -> T {
        let (value, violations) = checked.into_parts();
        self.errors.extend(
            violations
                .into_iter()
                .map(|v| FieldError::from_violation(field, v)),
        );
        value
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), ValidationErrors> {
        match ValidationErrors::new(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}
