use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, PatientStatus};
use shared_store::{AppointmentFilter, ClinicStore};

use crate::models::{BookAppointmentRequest, SchedulingError};
use crate::services::availability::AvailabilityService;

const DEFAULT_NO_SHOW_THRESHOLD: i32 = 3;

/// Applies appointment lifecycle transitions and keeps the denormalized
/// patient aggregates (no-show count, last appointment, risk status) in
/// step.
///
/// Mutations other than `book` report expected failures (unknown
/// appointment, unavailable slot) through their boolean result; the error
/// channel is reserved for malformed input and gateway failures.
pub struct BookingService {
    store: Arc<dyn ClinicStore>,
    availability: AvailabilityService,
    // Serializes check-then-act booking per doctor so two concurrent
    // requests cannot both claim the same slot.
    doctor_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl BookingService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        let availability = AvailabilityService::new(Arc::clone(&store));
        Self {
            store,
            availability,
            doctor_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn availability(&self) -> &AvailabilityService {
        &self.availability
    }

    /// Book a new appointment in the doctor's default slot length.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Uuid, SchedulingError> {
        if self.store.get_patient(request.patient_id).await?.is_none() {
            return Err(SchedulingError::PatientNotFound);
        }
        let doctor = self
            .store
            .get_doctor(request.doctor_id)
            .await?
            .ok_or(SchedulingError::DoctorNotFound)?;

        let lock = self.doctor_lock(doctor.id).await;
        let _guard = lock.lock().await;

        let slots = self
            .availability
            .available_slots(
                doctor.id,
                request.appointment_datetime.date_naive(),
                Some(doctor.appointment_duration),
            )
            .await?;

        if !slots.contains(&request.appointment_datetime) {
            warn!(
                "Slot {} not available for doctor {}",
                request.appointment_datetime, doctor.id
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: doctor.id,
            appointment_datetime: request.appointment_datetime,
            duration_minutes: doctor.appointment_duration,
            status: AppointmentStatus::Scheduled,
            appointment_type: request.appointment_type,
            notes: request.notes,
            insurance_verified: false,
            reminder_sent: false,
            confirmation_sent: false,
            created_at: now,
            updated_at: now,
        };

        let appointment_id = appointment.id;
        if !self.store.insert_appointment(appointment).await? {
            return Err(SchedulingError::Validation(
                "Failed to book appointment".to_string(),
            ));
        }

        info!(
            "Appointment {} booked for patient {} with doctor {}",
            appointment_id, request.patient_id, request.doctor_id
        );
        Ok(appointment_id)
    }

    /// Move an appointment to a new start time, checked against the slot
    /// set for the appointment's own duration. Leaves the reminder and
    /// confirmation flags untouched.
    pub async fn reschedule(
        &self,
        appointment_id: Uuid,
        new_datetime: DateTime<Utc>,
    ) -> Result<bool, SchedulingError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };

        let lock = self.doctor_lock(appointment.doctor_id).await;
        let _guard = lock.lock().await;

        let slots = self
            .availability
            .available_slots(
                appointment.doctor_id,
                new_datetime.date_naive(),
                Some(appointment.duration_minutes),
            )
            .await?;

        if !slots.contains(&new_datetime) {
            debug!(
                "Reschedule of {} to {} rejected: slot taken",
                appointment_id, new_datetime
            );
            return Ok(false);
        }

        appointment.appointment_datetime = new_datetime;
        appointment.status = AppointmentStatus::Rescheduled;
        appointment.updated_at = Utc::now();

        Ok(self.store.replace_appointment(appointment).await?)
    }

    /// Cancel an appointment, recording the reason in its notes. Always
    /// succeeds when the appointment exists; the freed slot becomes
    /// bookable again.
    pub async fn cancel(
        &self,
        appointment_id: Uuid,
        reason: &str,
    ) -> Result<bool, SchedulingError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };

        if reason.is_empty() {
            appointment.notes.push_str("\nCancelled");
        } else {
            appointment.notes.push_str(&format!("\nCancelled: {}", reason));
        }
        appointment.status = AppointmentStatus::Cancelled;
        appointment.updated_at = Utc::now();

        info!("Appointment {} cancelled", appointment_id);
        Ok(self.store.replace_appointment(appointment).await?)
    }

    /// Mark a missed appointment and bump the patient's no-show counter;
    /// reaching the configured threshold flips the patient to high risk.
    /// The promotion is one-directional.
    pub async fn mark_no_show(&self, appointment_id: Uuid) -> Result<bool, SchedulingError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };

        appointment.status = AppointmentStatus::NoShow;
        appointment.updated_at = Utc::now();

        let threshold = self
            .store
            .get_settings()
            .await?
            .map(|s| s.no_show_threshold)
            .unwrap_or(DEFAULT_NO_SHOW_THRESHOLD);

        if let Some(mut patient) = self.store.get_patient(appointment.patient_id).await? {
            patient.no_show_count += 1;
            if patient.no_show_count >= threshold {
                info!(
                    "Patient {} flagged high risk after {} no-shows",
                    patient.id, patient.no_show_count
                );
                patient.status = PatientStatus::HighRisk;
            }
            self.store.replace_patient(patient).await?;
        }

        Ok(self.store.replace_appointment(appointment).await?)
    }

    /// Complete an appointment and update the patient's last-appointment
    /// date.
    pub async fn complete(
        &self,
        appointment_id: Uuid,
        notes: &str,
    ) -> Result<bool, SchedulingError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };

        if notes.is_empty() {
            appointment.notes.push_str("\nCompleted");
        } else {
            appointment.notes.push_str(&format!("\nCompleted: {}", notes));
        }
        appointment.status = AppointmentStatus::Completed;
        appointment.updated_at = Utc::now();

        if let Some(mut patient) = self.store.get_patient(appointment.patient_id).await? {
            patient.last_appointment = Some(appointment.appointment_datetime);
            self.store.replace_patient(patient).await?;
        }

        Ok(self.store.replace_appointment(appointment).await?)
    }

    /// Appointments for one patient, optionally restricted to the future.
    pub async fn patient_appointments(
        &self,
        patient_id: Uuid,
        upcoming_only: bool,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments = self
            .store
            .list_appointments(AppointmentFilter::for_patient(patient_id))
            .await?;

        if upcoming_only {
            let now = Utc::now();
            appointments.retain(|apt| apt.appointment_datetime > now);
        }

        Ok(appointments)
    }

    /// A doctor's full schedule for one calendar day, in order.
    pub async fn doctor_schedule(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let start_of_day = date.and_time(NaiveTime::MIN).and_utc();
        let end_of_day = date
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap())
            .and_utc();

        Ok(self
            .store
            .list_appointments(
                AppointmentFilter::for_doctor(doctor_id).between(start_of_day, end_of_day),
            )
            .await?)
    }

    /// Active appointments starting within `hours_before` hours whose
    /// reminder has not gone out yet.
    pub async fn appointments_needing_reminders(
        &self,
        hours_before: i32,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let cutoff = Utc::now() + Duration::hours(hours_before as i64);
        let mut appointments = self
            .store
            .list_appointments(AppointmentFilter::default())
            .await?;

        appointments.retain(|apt| {
            apt.occupies_slot() && apt.appointment_datetime <= cutoff && !apt.reminder_sent
        });
        Ok(appointments)
    }

    /// Scheduled appointments starting within `hours_before` hours whose
    /// confirmation request has not gone out yet.
    pub async fn appointments_needing_confirmation(
        &self,
        hours_before: i32,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let cutoff = Utc::now() + Duration::hours(hours_before as i64);
        let mut appointments = self
            .store
            .list_appointments(AppointmentFilter::default())
            .await?;

        appointments.retain(|apt| {
            apt.status == AppointmentStatus::Scheduled
                && apt.appointment_datetime <= cutoff
                && !apt.confirmation_sent
        });
        Ok(appointments)
    }

    async fn doctor_lock(&self, doctor_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.doctor_locks.lock().await;
        locks
            .entry(doctor_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
