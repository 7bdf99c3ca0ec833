//! Driving-school validation
//!
//! Validation runs in two stages:
//!
//! 1. Field checks. Every field is trimmed/normalized and checked on its own.
//!    All failing rules of all fields are reported together.
//! 2. Normalization. Runs only on a stage-1-clean record: drops a blank
//!    description and applies the Cape Verde numbering-plan check to the
//!    phone number. A failure here is reported alone.

use std::fmt;
use std::str::FromStr;

use shared::models::{DrivingSchoolData, DrivingSchoolInput};
use thiserror::Error;

use super::extractors::{ErrorCode, Validatable, ValidationBuilder, ValidationErrors};
use super::sanitizers::{strip_phone_separators, trim, trim_lowercase, trim_optional};
use super::validators::{
    parse_positive_integer, validate_email, validate_length, validate_locale_phone,
    validate_max_length, validate_phone_format, Checked,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants for validation rules
// ─────────────────────────────────────────────────────────────────────────────

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 100;
const MIN_LOCATION_LENGTH: usize = 2;
const MAX_LOCATION_LENGTH: usize = 100;
const MIN_PHONE_LENGTH: usize = 7;
const MAX_PHONE_LENGTH: usize = 15;
const MAX_EMAIL_LENGTH: usize = 100;
const MIN_ADDRESS_LENGTH: usize = 5;
const MAX_ADDRESS_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 500;

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

/// The fields of the driving-school form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchoolField {
    Name,
    Location,
    PhoneNumber,
    Email,
    Address,
    Description,
    InstructorCapacity,
    StudentCapacity,
}

impl SchoolField {
    pub const ALL: [SchoolField; 8] = [
        SchoolField::Name,
        SchoolField::Location,
        SchoolField::PhoneNumber,
        SchoolField::Email,
        SchoolField::Address,
        SchoolField::Description,
        SchoolField::InstructorCapacity,
        SchoolField::StudentCapacity,
    ];

    /// Key used in payloads and error maps
    pub fn key(self) -> &'static str {
        match self {
            SchoolField::Name => "name",
            SchoolField::Location => "location",
            SchoolField::PhoneNumber => "phoneNumber",
            SchoolField::Email => "email",
            SchoolField::Address => "address",
            SchoolField::Description => "description",
            SchoolField::InstructorCapacity => "instructorCapacity",
            SchoolField::StudentCapacity => "studentCapacity",
        }
    }

    /// Label used in error messages
    pub fn label(self) -> &'static str {
        match self {
            SchoolField::Name => "Nome",
            SchoolField::Location => "Localização",
            SchoolField::PhoneNumber => "Telefone",
            SchoolField::Email => "Email",
            SchoolField::Address => "Endereço",
            SchoolField::Description => "Descrição",
            SchoolField::InstructorCapacity => "Capacidade de instrutores",
            SchoolField::StudentCapacity => "Capacidade de alunos",
        }
    }
}

impl fmt::Display for SchoolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown driving school field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SchoolField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchoolField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage 1: field checks
// ─────────────────────────────────────────────────────────────────────────────

fn check_text(field: SchoolField, raw: &str, min: usize, max: usize) -> Checked<String> {
    let value = trim(raw);
    let bounds = validate_length(&value, min, max, field.label());
    Checked::new(value).rule(bounds)
}

fn check_name(raw: &str) -> Checked<String> {
    check_text(SchoolField::Name, raw, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
}

fn check_location(raw: &str) -> Checked<String> {
    check_text(SchoolField::Location, raw, MIN_LOCATION_LENGTH, MAX_LOCATION_LENGTH)
}

fn check_address(raw: &str) -> Checked<String> {
    check_text(SchoolField::Address, raw, MIN_ADDRESS_LENGTH, MAX_ADDRESS_LENGTH)
}

fn check_phone(raw: &str) -> Checked<String> {
    let value = trim(raw);
    let bounds = validate_length(
        &value,
        MIN_PHONE_LENGTH,
        MAX_PHONE_LENGTH,
        SchoolField::PhoneNumber.label(),
    );
    let format = validate_phone_format(&value);
    Checked::new(value).rule(bounds).rule(format)
}

fn check_email(raw: &str) -> Checked<String> {
    let value = trim_lowercase(raw);
    let format = validate_email(&value);
    let bounds = validate_max_length(&value, MAX_EMAIL_LENGTH, SchoolField::Email.label());
    Checked::new(value).rule(format).rule(bounds)
}

// The description is bounded as typed; trimming waits for stage 2.
fn check_description(raw: Option<&str>) -> Checked<Option<String>> {
    let bounds = match raw {
        Some(text) => {
            validate_max_length(text, MAX_DESCRIPTION_LENGTH, SchoolField::Description.label())
        }
        None => Ok(()),
    };
    Checked::new(raw.map(str::to_string)).rule(bounds)
}

fn check_capacity(field: SchoolField, raw: &str) -> Checked<u32> {
    match parse_positive_integer(raw, field.label()) {
        Ok(value) => Checked::new(value),
        Err(violation) => Checked::new(0).rule(Err(violation)),
    }
}

/// A record whose fields all passed stage 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheckedSchool {
    name: String,
    location: String,
    phone_number: String,
    email: String,
    address: String,
    description: Option<String>,
    instructor_capacity: u32,
    student_capacity: u32,
}

/// Stage 1 for a single field, for live feedback while the form is edited
pub fn check_field(field: SchoolField, raw: &str) -> Result<(), ValidationErrors> {
    let mut builder = ValidationBuilder::new();
    let key = field.key();
    match field {
        SchoolField::Name => {
            builder.checked(key, check_name(raw));
        }
        SchoolField::Location => {
            builder.checked(key, check_location(raw));
        }
        SchoolField::PhoneNumber => {
            builder.checked(key, check_phone(raw));
        }
        SchoolField::Email => {
            builder.checked(key, check_email(raw));
        }
        SchoolField::Address => {
            builder.checked(key, check_address(raw));
        }
        SchoolField::Description => {
            builder.checked(key, check_description(Some(raw)));
        }
        SchoolField::InstructorCapacity | SchoolField::StudentCapacity => {
            builder.checked(key, check_capacity(field, raw));
        }
    }
    builder.build()
}

/// Stage 1: check every field independently and collect every failure
pub fn validate_fields(input: &DrivingSchoolInput) -> Result<FieldCheckedSchool, ValidationErrors> {
    let mut builder = ValidationBuilder::new();

    let name = builder.checked(SchoolField::Name.key(), check_name(&input.name));
    let location = builder.checked(SchoolField::Location.key(), check_location(&input.location));
    let phone_number = builder.checked(
        SchoolField::PhoneNumber.key(),
        check_phone(&input.phone_number),
    );
    let email = builder.checked(SchoolField::Email.key(), check_email(&input.email));
    let address = builder.checked(SchoolField::Address.key(), check_address(&input.address));
    let description = builder.checked(
        SchoolField::Description.key(),
        check_description(input.description.as_deref()),
    );
    let instructor_capacity = builder.checked(
        SchoolField::InstructorCapacity.key(),
        check_capacity(SchoolField::InstructorCapacity, &input.instructor_capacity),
    );
    let student_capacity = builder.checked(
        SchoolField::StudentCapacity.key(),
        check_capacity(SchoolField::StudentCapacity, &input.student_capacity),
    );

    builder.build()?;

    Ok(FieldCheckedSchool {
        name,
        location,
        phone_number,
        email,
        address,
        description,
        instructor_capacity,
        student_capacity,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage 2: normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Stage 2: finish normalizing a stage-1-clean record
pub fn normalize(checked: FieldCheckedSchool) -> Result<DrivingSchoolData, ValidationErrors> {
    let stripped = strip_phone_separators(&checked.phone_number);
    if let Err(violation) = validate_locale_phone(&stripped) {
        return Err(ValidationErrors::single(
            SchoolField::PhoneNumber.key(),
            ErrorCode::LocalePhoneInvalid,
            violation.message,
        ));
    }

    Ok(DrivingSchoolData {
        description: trim_optional(checked.description.as_deref()),
        name: checked.name,
        location: checked.location,
        phone_number: checked.phone_number,
        email: checked.email,
        address: checked.address,
        instructor_capacity: checked.instructor_capacity,
        student_capacity: checked.student_capacity,
    })
}

/// Run both stages
pub fn validate_school(input: &DrivingSchoolInput) -> Result<DrivingSchoolData, ValidationErrors> {
    normalize(validate_fields(input)?)
}

impl Validatable for DrivingSchoolInput {
    type Validated = DrivingSchoolData;

    fn validate(&self) -> Result<Self::Validated, ValidationErrors> {
        validate_school(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> DrivingSchoolInput {
        DrivingSchoolInput {
            name: "Auto Escola Praia".to_string(),
            location: "Praia".to_string(),
            phone_number: "+238 261 1234".to_string(),
            email: "geral@autoescolapraia.cv".to_string(),
            address: "Avenida Amílcar Cabral 12".to_string(),
            description: Some("Escola de condução no Plateau".to_string()),
            instructor_capacity: "8".to_string(),
            student_capacity: "120".to_string(),
        }
    }

    #[test]
    fn test_valid_input_passes_both_stages() {
        let data = validate_school(&valid_input()).unwrap();
        assert_eq!(data.name, "Auto Escola Praia");
        assert_eq!(data.phone_number, "+238 261 1234");
        assert_eq!(data.instructor_capacity, 8);
        assert_eq!(data.student_capacity, 120);
        assert_eq!(
            data.description.as_deref(),
            Some("Escola de condução no Plateau")
        );
    }

    #[test]
    fn test_short_name_is_rejected() {
        for name in ["", "a", "ab", "  ab  "] {
            let input = DrivingSchoolInput {
                name: name.to_string(),
                ..valid_input()
            };
            let errors = validate_school(&input).unwrap_err();
            assert!(errors.has("name", ErrorCode::TooShort), "{name:?}");
        }
    }

    #[test]
    fn test_long_name_is_rejected() {
        let input = DrivingSchoolInput {
            name: "x".repeat(101),
            ..valid_input()
        };
        let errors = validate_school(&input).unwrap_err();
        assert!(errors.has("name", ErrorCode::TooLong));
    }

    #[test]
    fn test_all_invalid_fields_are_reported_together() {
        let input = DrivingSchoolInput {
            name: String::new(),
            email: "not-an-email".to_string(),
            instructor_capacity: "0".to_string(),
            ..valid_input()
        };
        let errors = validate_school(&input).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["name", "email", "instructorCapacity"]
        );
        assert!(errors.has("email", ErrorCode::FormatInvalid));
    }

    #[test]
    fn test_field_reports_every_failing_rule() {
        let input = DrivingSchoolInput {
            phone_number: "abc".to_string(),
            ..valid_input()
        };
        let errors = validate_fields(&input).unwrap_err();
        assert!(errors.has("phoneNumber", ErrorCode::TooShort));
        assert!(errors.has("phoneNumber", ErrorCode::FormatInvalid));
        assert_eq!(errors.by_field()["phoneNumber"].len(), 2);
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let input = DrivingSchoolInput {
            email: "  USER@EXAMPLE.COM  ".to_string(),
            ..valid_input()
        };
        let data = validate_school(&input).unwrap();
        assert_eq!(data.email, "user@example.com");

        let again = validate_school(&DrivingSchoolInput::from(&data)).unwrap();
        assert_eq!(again.email, "user@example.com");
    }

    #[test]
    fn test_long_email_is_rejected() {
        let input = DrivingSchoolInput {
            email: format!("{}@example.com", "a".repeat(95)),
            ..valid_input()
        };
        let errors = validate_school(&input).unwrap_err();
        assert!(errors.has("email", ErrorCode::TooLong));
    }

    #[test]
    fn test_address_bounds() {
        let short = DrivingSchoolInput {
            address: "Rua1".to_string(),
            ..valid_input()
        };
        let errors = validate_fields(&short).unwrap_err();
        assert!(errors.has("address", ErrorCode::TooShort));

        let long = DrivingSchoolInput {
            address: "a".repeat(201),
            ..valid_input()
        };
        let errors = validate_fields(&long).unwrap_err();
        assert!(errors.has("address", ErrorCode::TooLong));

        let widest = DrivingSchoolInput {
            address: "a".repeat(200),
            ..valid_input()
        };
        assert!(validate_school(&widest).is_ok());
    }

    #[test]
    fn test_long_location_is_rejected() {
        let input = DrivingSchoolInput {
            location: "l".repeat(101),
            ..valid_input()
        };
        let errors = validate_fields(&input).unwrap_err();
        assert!(errors.has("location", ErrorCode::TooLong));
        assert_eq!(errors.fields(), vec!["location"]);
    }

    #[test]
    fn test_values_at_upper_bounds_are_accepted() {
        let input = DrivingSchoolInput {
            name: "n".repeat(100),
            location: "l".repeat(100),
            email: format!("{}@example.com", "a".repeat(88)),
            description: Some("d".repeat(500)),
            phone_number: "+238 261 123456".to_string(),
            ..valid_input()
        };
        assert_eq!(input.email.chars().count(), 100);
        assert_eq!(input.phone_number.chars().count(), 15);

        let data = validate_school(&input).unwrap();
        assert_eq!(data.name.chars().count(), 100);
        assert_eq!(data.email.chars().count(), 100);
        assert_eq!(data.description.map(|d| d.chars().count()), Some(500));
        assert_eq!(data.phone_number, "+238 261 123456");
    }

    #[test]
    fn test_capacity_parsing() {
        for (raw, code) in [
            ("0", ErrorCode::NotPositiveInteger),
            ("-5", ErrorCode::NotPositiveInteger),
            ("dez", ErrorCode::NotPositiveInteger),
            ("", ErrorCode::Required),
        ] {
            let input = DrivingSchoolInput {
                instructor_capacity: raw.to_string(),
                ..valid_input()
            };
            let errors = validate_school(&input).unwrap_err();
            assert!(errors.has("instructorCapacity", code), "{raw:?}");
        }

        let input = DrivingSchoolInput {
            instructor_capacity: "10".to_string(),
            ..valid_input()
        };
        assert_eq!(validate_school(&input).unwrap().instructor_capacity, 10);
    }

    #[test]
    fn test_blank_description_becomes_absent() {
        let input = DrivingSchoolInput {
            description: Some("   ".to_string()),
            ..valid_input()
        };
        assert_eq!(validate_school(&input).unwrap().description, None);

        let input = DrivingSchoolInput {
            description: None,
            ..valid_input()
        };
        assert_eq!(validate_school(&input).unwrap().description, None);
    }

    #[test]
    fn test_description_is_trimmed_in_stage_two() {
        let input = DrivingSchoolInput {
            description: Some("  Aulas teóricas e práticas  ".to_string()),
            ..valid_input()
        };
        let checked = validate_fields(&input).unwrap();
        let data = normalize(checked).unwrap();
        assert_eq!(data.description.as_deref(), Some("Aulas teóricas e práticas"));
    }

    #[test]
    fn test_description_length_is_checked_before_trimming() {
        let input = DrivingSchoolInput {
            description: Some(format!("{}  ", "d".repeat(499))),
            ..valid_input()
        };
        let errors = validate_school(&input).unwrap_err();
        assert!(errors.has("description", ErrorCode::TooLong));
    }

    #[test]
    fn test_phone_numbers() {
        let too_long = DrivingSchoolInput {
            phone_number: "12345678901234567".to_string(),
            ..valid_input()
        };
        let errors = validate_fields(&too_long).unwrap_err();
        assert!(errors.has("phoneNumber", ErrorCode::TooLong));

        // seven digits without the country prefix satisfy the numbering-plan pattern
        let local = DrivingSchoolInput {
            phone_number: "261-1234".to_string(),
            ..valid_input()
        };
        let data = validate_school(&local).unwrap();
        assert_eq!(data.phone_number, "261-1234");
    }

    #[test]
    fn test_foreign_prefix_fails_only_stage_two() {
        let input = DrivingSchoolInput {
            phone_number: "+1 202 555 0123".to_string(),
            ..valid_input()
        };
        assert!(validate_fields(&input).is_ok());

        let errors = validate_school(&input).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has("phoneNumber", ErrorCode::LocalePhoneInvalid));
        assert_eq!(
            errors.errors()[0].message,
            "Número de telefone inválido para Cabo Verde"
        );
    }

    #[test]
    fn test_too_few_digits_after_stripping_fails_stage_two() {
        let input = DrivingSchoolInput {
            phone_number: "12 - 345".to_string(),
            ..valid_input()
        };
        assert!(validate_fields(&input).is_ok());
        let errors = validate_school(&input).unwrap_err();
        assert!(errors.has("phoneNumber", ErrorCode::LocalePhoneInvalid));
    }

    #[test]
    fn test_stage_two_does_not_run_on_stage_one_failures() {
        let input = DrivingSchoolInput {
            name: "ab".to_string(),
            phone_number: "+1 202 555 0123".to_string(),
            ..valid_input()
        };
        let errors = validate_school(&input).unwrap_err();
        assert!(errors.has("name", ErrorCode::TooShort));
        assert!(!errors.has("phoneNumber", ErrorCode::LocalePhoneInvalid));
    }

    #[test]
    fn test_check_field() {
        assert!(check_field(SchoolField::Name, "Auto Escola").is_ok());
        assert!(check_field(SchoolField::Location, "P").is_err());
        assert!(check_field(SchoolField::Description, "").is_ok());

        let errors = check_field(SchoolField::StudentCapacity, "-1").unwrap_err();
        assert!(errors.has("studentCapacity", ErrorCode::NotPositiveInteger));

        // the numbering-plan rule is not part of per-field feedback
        assert!(check_field(SchoolField::PhoneNumber, "+1 202 555 0123").is_ok());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in SchoolField::ALL {
            assert_eq!(field.key().parse::<SchoolField>().unwrap(), field);
        }
        assert!("phone_number".parse::<SchoolField>().is_err());
    }
}
