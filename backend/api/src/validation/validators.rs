//! Field validators for input validation
//!
//! Reusable rule functions for the driving-school form. Each rule returns a
//! `Violation` carrying an error code and a user-facing (Portuguese) message.

use lazy_static::lazy_static;
use regex::Regex;

use super::extractors::ErrorCode;

lazy_static! {
    /// Optional leading '+', then digits, spaces and hyphens only
    static ref PHONE_FORMAT_REGEX: Regex = Regex::new(r"^\+?[0-9 \-]+$").unwrap();

    /// Cape Verde numbering plan, applied after separators are stripped
    static ref LOCALE_PHONE_REGEX: Regex = Regex::new(r"^(\+238)?\s?[0-9\s\-]{7,}$").unwrap();

    /// local-part@domain with at least one dot in the domain
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z0-9]([a-z0-9-]*[a-z0-9])?$"
    ).unwrap();
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub code: ErrorCode,
    pub message: String,
}

impl Violation {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A normalized field value together with every rule it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked<T> {
    value: T,
    violations: Vec<Violation>,
}

impl<T> Checked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            violations: Vec::new(),
        }
    }

    /// Record the rule outcome without stopping at the first failure
    pub fn rule(mut self, outcome: Result<(), Violation>) -> Self {
        if let Err(violation) = outcome {
            self.violations.push(violation);
        }
        self
    }

    pub fn into_parts(self) -> (T, Vec<Violation>) {
        (self.value, self.violations)
    }
}

/// Validate string length within bounds, counted in characters
pub fn validate_length(value: &str, min: usize, max: usize, label: &str) -> Result<(), Violation> {
    let len = value.chars().count();
    if len < min {
        return Err(Violation::new(
            ErrorCode::TooShort,
            format!("{} deve ter pelo menos {} caracteres", label, min),
        ));
    }
    if len > max {
        return Err(Violation::new(
            ErrorCode::TooLong,
            format!("{} deve ter no máximo {} caracteres", label, max),
        ));
    }
    Ok(())
}

/// Validate only the upper length bound
pub fn validate_max_length(value: &str, max: usize, label: &str) -> Result<(), Violation> {
    validate_length(value, 0, max, label)
}

/// Validate the character set of a phone number
pub fn validate_phone_format(phone: &str) -> Result<(), Violation> {
    if !PHONE_FORMAT_REGEX.is_match(phone) {
        return Err(Violation::new(
            ErrorCode::FormatInvalid,
            "Telefone deve conter apenas dígitos, espaços, hífens e um '+' inicial opcional",
        ));
    }
    Ok(())
}

/// Validate a phone number (separators already stripped) against the
/// Cape Verde numbering plan
pub fn validate_locale_phone(stripped: &str) -> Result<(), Violation> {
    if !LOCALE_PHONE_REGEX.is_match(stripped) {
        return Err(Violation::new(
            ErrorCode::LocalePhoneInvalid,
            "Número de telefone inválido para Cabo Verde",
        ));
    }
    Ok(())
}

/// Validate email syntax
pub fn validate_email(email: &str) -> Result<(), Violation> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(Violation::new(ErrorCode::FormatInvalid, "Email inválido"));
    }
    Ok(())
}

/// Parse a strictly positive base-10 integer from form text.
///
/// Surrounding whitespace is ignored. Blank input is `Required`; anything
/// else that is not an integer in `1..=u32::MAX` is `NotPositiveInteger`.
pub fn parse_positive_integer(value: &str, label: &str) -> Result<u32, Violation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Violation::new(
            ErrorCode::Required,
            format!("{} é um campo obrigatório", label),
        ));
    }

    let not_positive = || {
        Violation::new(
            ErrorCode::NotPositiveInteger,
            format!("{} deve ser um número inteiro positivo", label),
        )
    };

    let parsed: i64 = trimmed.parse().map_err(|_| not_positive())?;
    if parsed <= 0 {
        return Err(not_positive());
    }
    u32::try_from(parsed).map_err(|_| not_positive())
}
