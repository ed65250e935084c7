use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;
use uuid::Uuid;

use shared_models::{Doctor, WEEKDAY_KEYS};
use shared_store::ClinicStore;

use crate::models::{
    CreateDoctorRequest, DEFAULT_APPOINTMENT_DURATION, DEFAULT_MAX_PATIENTS_PER_DAY,
};

pub struct DoctorService {
    store: Arc<dyn ClinicStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Add a doctor to the roster after validating the working-hours map.
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor> {
        debug!("Creating doctor {} {}", request.first_name, request.last_name);

        if request.working_hours.is_empty() {
            return Err(anyhow!("Doctor must have at least one working day"));
        }

        for (day, window) in &request.working_hours {
            if !WEEKDAY_KEYS.contains(&day.as_str()) {
                return Err(anyhow!("Unknown weekday: {}", day));
            }
            if window.start >= window.end {
                return Err(anyhow!("Start time must be before end time on {}", day));
            }
        }

        let appointment_duration = request
            .appointment_duration
            .unwrap_or(DEFAULT_APPOINTMENT_DURATION);
        if appointment_duration <= 0 {
            return Err(anyhow!("Appointment duration must be positive"));
        }

        let doctor = Doctor {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            specialty: request.specialty,
            phone: request.phone,
            email: request.email,
            working_hours: request.working_hours,
            appointment_duration,
            max_patients_per_day: request
                .max_patients_per_day
                .unwrap_or(DEFAULT_MAX_PATIENTS_PER_DAY),
            is_active: true,
        };

        if !self.store.insert_doctor(doctor.clone()).await? {
            return Err(anyhow!("Failed to add doctor - doctor may already exist"));
        }

        debug!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>> {
        Ok(self.store.get_doctor(doctor_id).await?)
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.store.list_doctors().await?)
    }
}
