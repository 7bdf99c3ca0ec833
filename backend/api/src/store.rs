//! In-memory driving-school directory
//!
//! Stands in for the persistence layer: records are kept in insertion order
//! and identifiers/timestamps are assigned here.

use chrono::Utc;
use shared::models::{DrivingSchool, DrivingSchoolData, SchoolStats};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::metrics;
use crate::mock;
use crate::validation::{validate_school, ValidationErrors};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("driving school {0} not found")]
    SchoolNotFound(Uuid),
}

#[derive(Debug, Default)]
pub struct SchoolStore {
    schools: RwLock<Vec<DrivingSchool>>,
}

impl SchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<DrivingSchool> {
        self.schools.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Result<DrivingSchool, StoreError> {
        self.schools
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::SchoolNotFound(id))
    }

    /// Store a validated record under a fresh identifier
    pub async fn create(&self, data: DrivingSchoolData) -> DrivingSchool {
        let now = Utc::now();
        let school = DrivingSchool {
            id: Uuid::new_v4(),
            data,
            created_at: now,
            updated_at: now,
        };

        let mut schools = self.schools.write().await;
        schools.push(school.clone());
        metrics::SCHOOLS_TOTAL.set(schools.len() as i64);

        tracing::info!(school_id = %school.id, name = %school.data.name, "driving school created");
        school
    }

    /// Replace the record of an existing school, keeping its identity
    pub async fn update(&self, id: Uuid, data: DrivingSchoolData) -> Result<DrivingSchool, StoreError> {
        let mut schools = self.schools.write().await;
        let school = schools
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SchoolNotFound(id))?;

        school.data = data;
        school.updated_at = Utc::now();

        tracing::info!(school_id = %id, name = %school.data.name, "driving school updated");
        Ok(school.clone())
    }

    pub async fn stats(&self) -> SchoolStats {
        SchoolStats::from_schools(&self.schools.read().await)
    }

    pub async fn count(&self) -> usize {
        self.schools.read().await.len()
    }

    /// Load the mock directory, validating every record on the way in
    pub async fn seed_mock(&self) -> Result<usize, ValidationErrors> {
        let mut seeded = 0;
        for input in mock::mock_schools() {
            let data = validate_school(&input)?;
            self.create(data).await;
            seeded += 1;
        }
        tracing::info!(count = seeded, "mock driving schools loaded");
        Ok(seeded)
    }
}
