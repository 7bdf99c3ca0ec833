//! Input Validation Module
//!
//! Validation and normalization of driving-school records submitted from
//! the dashboard form.
//!
//! # Overview
//!
//! The validation system consists of four components:
//!
//! 1. **Validators** - Reusable rule functions (lengths, phone, email, capacities)
//! 2. **Sanitizers** - Functions to trim and normalize raw values
//! 3. **Schools** - The two-stage driving-school contract built from the above
//! 4. **Extractors** - Error types and the `ValidatedJson<T>` axum extractor
//!
//! # Usage
//!
//! ```ignore
//! use crate::validation::ValidatedJson;
//! use shared::DrivingSchoolInput;
//!
//! // The handler only ever sees a normalized `DrivingSchoolData`
//! pub async fn create_school(
//!     ValidatedJson(school): ValidatedJson<DrivingSchoolInput>,
//! ) -> impl IntoResponse {
//!     // ...
//! }
//! ```
//!
//! ## Validation Error Response
//!
//! When validation fails, a 400 Bad Request is returned. Creating, editing
//! and the submit-time dry run all answer with the same body:
//!
//! ```json
//! {
//!   "error": "ValidationError",
//!   "message": "Validation failed for 2 fields",
//!   "errors": [
//!     {"field": "name", "code": "too_short", "message": "Nome deve ter pelo menos 3 caracteres"},
//!     {"field": "email", "code": "format_invalid", "message": "Email inválido"}
//!   ],
//!   "fields": {
//!     "email": ["Email inválido"],
//!     "name": ["Nome deve ter pelo menos 3 caracteres"]
//!   },
//!   "code": 400,
//!   "timestamp": "2026-02-20T10:30:00Z",
//!   "correlation_id": "uuid-here"
//! }
//! ```

pub mod extractors;
pub mod sanitizers;
pub mod schools;
pub mod validators;

// Re-export commonly used items
pub use extractors::{
    ErrorCode, FieldError, Validatable, ValidatedJson, ValidationBuilder, ValidationErrorResponse,
    ValidationErrors,
};
pub use schools::{
    check_field, normalize, validate_fields, validate_school, FieldCheckedSchool, SchoolField,
    UnknownField,
};
