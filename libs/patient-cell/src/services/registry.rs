use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::{CommunicationChannel, InsuranceStatus, Patient, PatientStatus};
use shared_store::ClinicStore;

use crate::models::{PatientSearchQuery, RegisterPatientRequest};

pub struct PatientRegistryService {
    store: Arc<dyn ClinicStore>,
}

impl PatientRegistryService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Register a new patient and return the generated id.
    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<Uuid> {
        let patient = Patient {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            phone: request.phone,
            email: request.email,
            address: request.address,
            emergency_contact: request.emergency_contact,
            insurance_provider: request.insurance_provider,
            insurance_number: request.insurance_number,
            insurance_status: InsuranceStatus::Pending,
            status: PatientStatus::Active,
            no_show_count: 0,
            last_appointment: None,
            preferred_communication: request
                .preferred_communication
                .unwrap_or(CommunicationChannel::Phone),
            notes: request.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let patient_id = patient.id;
        if !self.store.insert_patient(patient).await? {
            return Err(anyhow!(
                "Failed to register patient - patient may already exist"
            ));
        }

        debug!("Registered patient {}", patient_id);
        Ok(patient_id)
    }

    pub async fn get_patient(&self, patient_id: Uuid) -> Result<Option<Patient>> {
        Ok(self.store.get_patient(patient_id).await?)
    }

    /// Find patients matching every provided criterion.
    pub async fn find_patients(&self, query: PatientSearchQuery) -> Result<Vec<Patient>> {
        let patients = self.store.list_patients().await?;

        let results = patients
            .into_iter()
            .filter(|patient| {
                if let Some(phone) = &query.phone {
                    if &patient.phone != phone {
                        return false;
                    }
                }
                if let Some(email) = &query.email {
                    if &patient.email != email {
                        return false;
                    }
                }
                if let Some(first_name) = &query.first_name {
                    if !patient.first_name.eq_ignore_ascii_case(first_name) {
                        return false;
                    }
                }
                if let Some(last_name) = &query.last_name {
                    if !patient.last_name.eq_ignore_ascii_case(last_name) {
                        return false;
                    }
                }
                true
            })
            .collect();

        Ok(results)
    }

    /// Patients flagged for no-show intervention.
    pub async fn high_risk_patients(&self) -> Result<Vec<Patient>> {
        let patients = self.store.list_patients().await?;
        Ok(patients
            .into_iter()
            .filter(|p| p.status == PatientStatus::HighRisk)
            .collect())
    }
}
