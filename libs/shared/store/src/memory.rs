use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::{Appointment, ClinicSettings, Doctor, NoShowPrediction, Patient};

use crate::gateway::{AppointmentFilter, ClinicStore, StoreError};

#[derive(Default)]
struct Inner {
    patients: HashMap<Uuid, Patient>,
    doctors: HashMap<Uuid, Doctor>,
    appointments: HashMap<Uuid, Appointment>,
    // keyed by appointment id - one live prediction per appointment
    predictions: HashMap<Uuid, NoShowPrediction>,
    settings: Option<ClinicSettings>,
}

/// In-process implementation of the persistence gateway, used by the API
/// binary and by the test suites.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn insert_patient(&self, patient: Patient) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.patients.contains_key(&patient.id) {
            return Ok(false);
        }
        inner.patients.insert(patient.id, patient);
        Ok(true)
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>, StoreError> {
        Ok(self.inner.read().await.patients.get(&id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        let inner = self.inner.read().await;
        let mut patients: Vec<Patient> = inner.patients.values().cloned().collect();
        patients.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(patients)
    }

    async fn replace_patient(&self, patient: Patient) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.patients.contains_key(&patient.id) {
            return Ok(false);
        }
        inner.patients.insert(patient.id, patient);
        Ok(true)
    }

    async fn insert_doctor(&self, doctor: Doctor) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.doctors.contains_key(&doctor.id) {
            return Ok(false);
        }
        inner.doctors.insert(doctor.id, doctor);
        Ok(true)
    }

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(self.inner.read().await.doctors.get(&id).cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        let inner = self.inner.read().await;
        let mut doctors: Vec<Doctor> = inner.doctors.values().cloned().collect();
        doctors.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(doctors)
    }

    async fn replace_doctor(&self, doctor: Doctor) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.doctors.contains_key(&doctor.id) {
            return Ok(false);
        }
        inner.doctors.insert(doctor.id, doctor);
        Ok(true)
    }

    async fn insert_appointment(&self, appointment: Appointment) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.appointments.contains_key(&appointment.id) {
            return Ok(false);
        }
        inner.appointments.insert(appointment.id, appointment);
        Ok(true)
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.inner.read().await.appointments.get(&id).cloned())
    }

    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        let mut appointments: Vec<Appointment> = inner
            .appointments
            .values()
            .filter(|apt| {
                if let Some(patient_id) = filter.patient_id {
                    if apt.patient_id != patient_id {
                        return false;
                    }
                }
                if let Some(doctor_id) = filter.doctor_id {
                    if apt.doctor_id != doctor_id {
                        return false;
                    }
                }
                if let Some(from) = filter.from {
                    if apt.appointment_datetime < from {
                        return false;
                    }
                }
                if let Some(to) = filter.to {
                    if apt.appointment_datetime > to {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        appointments.sort_by(|a, b| a.appointment_datetime.cmp(&b.appointment_datetime));
        Ok(appointments)
    }

    async fn replace_appointment(&self, appointment: Appointment) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.appointments.contains_key(&appointment.id) {
            return Ok(false);
        }
        inner.appointments.insert(appointment.id, appointment);
        Ok(true)
    }

    async fn upsert_prediction(&self, prediction: NoShowPrediction) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .predictions
            .insert(prediction.appointment_id, prediction);
        Ok(())
    }

    async fn get_prediction(
        &self,
        appointment_id: Uuid,
    ) -> Result<Option<NoShowPrediction>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .predictions
            .get(&appointment_id)
            .cloned())
    }

    async fn get_settings(&self) -> Result<Option<ClinicSettings>, StoreError> {
        Ok(self.inner.read().await.settings.clone())
    }

    async fn put_settings(&self, settings: ClinicSettings) -> Result<(), StoreError> {
        self.inner.write().await.settings = Some(settings);
        Ok(())
    }
}
