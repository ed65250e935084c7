use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{Appointment, ClinicSettings, Doctor, NoShowPrediction, Patient};

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Filter for appointment listings. All criteria are conjunctive; date
/// bounds are inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl AppointmentFilter {
    pub fn for_patient(patient_id: Uuid) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }

    pub fn for_doctor(doctor_id: Uuid) -> Self {
        Self {
            doctor_id: Some(doctor_id),
            ..Self::default()
        }
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

/// Persistence gateway for the clinic. Keyed by entity id; listings
/// return records ordered by appointment datetime where applicable.
///
/// Inserts are insert-if-absent and report `false` when the id already
/// exists; replaces report `false` when the id is unknown.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn insert_patient(&self, patient: Patient) -> Result<bool, StoreError>;
    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>, StoreError>;
    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError>;
    async fn replace_patient(&self, patient: Patient) -> Result<bool, StoreError>;

    async fn insert_doctor(&self, doctor: Doctor) -> Result<bool, StoreError>;
    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;
    async fn replace_doctor(&self, doctor: Doctor) -> Result<bool, StoreError>;

    async fn insert_appointment(&self, appointment: Appointment) -> Result<bool, StoreError>;
    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;
    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError>;
    async fn replace_appointment(&self, appointment: Appointment) -> Result<bool, StoreError>;

    /// Stores a prediction, replacing any existing row for the same
    /// appointment.
    async fn upsert_prediction(&self, prediction: NoShowPrediction) -> Result<(), StoreError>;
    async fn get_prediction(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<NoShowPrediction>, StoreError>;

    async fn get_settings(&self) -> Result<Option<ClinicSettings>, StoreError>;
    async fn put_settings(&self, settings: ClinicSettings) -> Result<(), StoreError>;
}
