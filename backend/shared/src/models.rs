use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════════
// DRIVING SCHOOL RECORDS
// ═══════════════════════════════════════════════════════════════════════════

/// Raw driving-school record as captured by the create/edit form.
///
/// Every value is kept exactly as typed; the capacities arrive as text
/// because the form collects them from freeform inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingSchoolInput {
    pub name: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
    pub instructor_capacity: String,
    pub student_capacity: String,
}

/// Normalized driving-school record produced by validation.
///
/// Text fields are trimmed, `email` is lower-case, the capacities are
/// strictly positive and `description` is either absent or non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingSchoolData {
    pub name: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instructor_capacity: u32,
    pub student_capacity: u32,
}

impl From<&DrivingSchoolData> for DrivingSchoolInput {
    fn from(data: &DrivingSchoolData) -> Self {
        Self {
            name: data.name.clone(),
            location: data.location.clone(),
            phone_number: data.phone_number.clone(),
            email: data.email.clone(),
            address: data.address.clone(),
            description: data.description.clone(),
            instructor_capacity: data.instructor_capacity.to_string(),
            student_capacity: data.student_capacity.to_string(),
        }
    }
}

/// A driving school held in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingSchool {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: DrivingSchoolData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════════
// DIRECTORY AGGREGATES
// ═══════════════════════════════════════════════════════════════════════════

/// Aggregate figures shown above the school list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolStats {
    pub total_schools: u64,
    pub total_instructor_capacity: u64,
    pub total_student_capacity: u64,
    pub distinct_locations: u64,
    pub average_students_per_instructor: f64,
}

impl SchoolStats {
    pub fn from_schools(schools: &[DrivingSchool]) -> Self {
        let total_instructor_capacity: u64 = schools
            .iter()
            .map(|s| u64::from(s.data.instructor_capacity))
            .sum();
        let total_student_capacity: u64 = schools
            .iter()
            .map(|s| u64::from(s.data.student_capacity))
            .sum();

        let mut locations: Vec<String> = schools
            .iter()
            .map(|s| s.data.location.to_lowercase())
            .collect();
        locations.sort();
        locations.dedup();

        let average_students_per_instructor = if total_instructor_capacity == 0 {
            0.0
        } else {
            total_student_capacity as f64 / total_instructor_capacity as f64
        };

        Self {
            total_schools: schools.len() as u64,
            total_instructor_capacity,
            total_student_capacity,
            distinct_locations: locations.len() as u64,
            average_students_per_instructor,
        }
    }
}

/// Response body for the school listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolDirectory {
    pub schools: Vec<DrivingSchool>,
    pub stats: SchoolStats,
}

impl SchoolDirectory {
    pub fn new(schools: Vec<DrivingSchool>) -> Self {
        let stats = SchoolStats::from_schools(&schools);
        Self { schools, stats }
    }
}
