use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use prediction_cell::services::NoShowPredictor;
use scheduling_cell::services::BookingService;
use shared_models::{Appointment, AppointmentStatus, CommunicationChannel, Doctor, Patient};
use shared_store::ClinicStore;

use crate::models::{NotificationError, ReminderRunReport};
use crate::services::sink::NotificationSink;
use crate::services::templates;

// Stored risk score above which the urgent reminder wording is used.
const URGENT_REMINDER_SCORE: f64 = 0.7;

const HIGH_RISK_LISTING_THRESHOLD: f64 = 0.6;

/// Renders and dispatches patient-facing messages through the configured
/// sink, and flips the monotonic sent flags on success. A message whose
/// flag is already set is reported as sent without another delivery.
pub struct NotificationService {
    store: Arc<dyn ClinicStore>,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn ClinicStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { store, sink }
    }

    /// Send the reminder for one appointment. Wording escalates when the
    /// stored prediction marks the appointment high risk.
    pub async fn send_reminder(&self, appointment_id: Uuid) -> Result<bool, NotificationError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };
        let Some((patient, doctor)) = self.participants(&appointment).await? else {
            return Ok(false);
        };

        if appointment.reminder_sent {
            return Ok(true);
        }

        let high_risk = match self.store.get_prediction(appointment_id).await? {
            Some(prediction) => prediction.risk_score > URGENT_REMINDER_SCORE,
            None => false,
        };

        let clinic_name = self.clinic_name().await?;
        let delivered = match patient.preferred_communication {
            CommunicationChannel::Email => {
                let body = if high_risk {
                    templates::high_risk_reminder_email(
                        &patient,
                        &doctor,
                        &appointment,
                        &clinic_name,
                    )
                } else {
                    templates::standard_reminder_email(
                        &patient,
                        &doctor,
                        &appointment,
                        &clinic_name,
                    )
                };
                let subject = templates::reminder_subject(&doctor, high_risk);
                self.sink
                    .deliver(
                        CommunicationChannel::Email,
                        &patient.email,
                        Some(&subject),
                        &body,
                    )
                    .await
            }
            channel => {
                let body = templates::reminder_sms(&doctor, &appointment, high_risk);
                self.sink
                    .deliver(channel, &patient.phone, None, &body)
                    .await
            }
        };

        if delivered {
            appointment.reminder_sent = true;
            appointment.updated_at = Utc::now();
            self.store.replace_appointment(appointment).await?;
        }

        Ok(delivered)
    }

    /// Ask the patient to confirm an upcoming appointment.
    pub async fn send_confirmation(&self, appointment_id: Uuid) -> Result<bool, NotificationError> {
        let Some(mut appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };
        let Some((patient, doctor)) = self.participants(&appointment).await? else {
            return Ok(false);
        };

        if appointment.confirmation_sent {
            return Ok(true);
        }

        let clinic_name = self.clinic_name().await?;
        let delivered = match patient.preferred_communication {
            CommunicationChannel::Email => {
                let body =
                    templates::confirmation_email(&patient, &doctor, &appointment, &clinic_name);
                let subject = templates::confirmation_subject(&doctor);
                self.sink
                    .deliver(
                        CommunicationChannel::Email,
                        &patient.email,
                        Some(&subject),
                        &body,
                    )
                    .await
            }
            channel => {
                let body = templates::confirmation_sms(&doctor, &appointment);
                self.sink
                    .deliver(channel, &patient.phone, None, &body)
                    .await
            }
        };

        if delivered {
            appointment.confirmation_sent = true;
            appointment.updated_at = Utc::now();
            self.store.replace_appointment(appointment).await?;
        }

        Ok(delivered)
    }

    /// Follow up after a missed appointment. Only applies to no-shows.
    pub async fn send_no_show_follow_up(
        &self,
        appointment_id: Uuid,
    ) -> Result<bool, NotificationError> {
        let Some(appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };
        if appointment.status != AppointmentStatus::NoShow {
            return Ok(false);
        }
        let Some((patient, doctor)) = self.participants(&appointment).await? else {
            return Ok(false);
        };

        let clinic_name = self.clinic_name().await?;
        let delivered = match patient.preferred_communication {
            CommunicationChannel::Email => {
                let body = templates::no_show_followup_email(
                    &patient,
                    &doctor,
                    &appointment,
                    &clinic_name,
                );
                let subject = templates::no_show_followup_subject();
                self.sink
                    .deliver(
                        CommunicationChannel::Email,
                        &patient.email,
                        Some(&subject),
                        &body,
                    )
                    .await
            }
            channel => {
                let body = templates::no_show_followup_sms(&doctor);
                self.sink
                    .deliver(channel, &patient.phone, None, &body)
                    .await
            }
        };

        Ok(delivered)
    }

    /// Notify the patient that an appointment was cancelled.
    pub async fn send_cancellation(
        &self,
        appointment_id: Uuid,
        reason: &str,
    ) -> Result<bool, NotificationError> {
        let Some(appointment) = self.store.get_appointment(appointment_id).await? else {
            return Ok(false);
        };
        let Some((patient, doctor)) = self.participants(&appointment).await? else {
            return Ok(false);
        };

        let clinic_name = self.clinic_name().await?;
        let delivered = match patient.preferred_communication {
            CommunicationChannel::Email => {
                let body = templates::cancellation_email(
                    &patient,
                    &doctor,
                    &appointment,
                    reason,
                    &clinic_name,
                );
                let subject = templates::cancellation_subject(&doctor);
                self.sink
                    .deliver(
                        CommunicationChannel::Email,
                        &patient.email,
                        Some(&subject),
                        &body,
                    )
                    .await
            }
            channel => {
                let body = templates::cancellation_sms(&doctor, &appointment);
                self.sink
                    .deliver(channel, &patient.phone, None, &body)
                    .await
            }
        };

        Ok(delivered)
    }

    /// One sweep over everything due: reminders, confirmation requests,
    /// and a tally of high-risk appointments for the front desk.
    pub async fn process_scheduled(&self) -> Result<ReminderRunReport, NotificationError> {
        let settings = self
            .store
            .get_settings()
            .await?
            .ok_or(NotificationError::SettingsNotConfigured)?;

        let booking = BookingService::new(Arc::clone(&self.store));
        let mut report = ReminderRunReport::default();

        let due_reminders = booking
            .appointments_needing_reminders(settings.reminder_hours_before)
            .await
            .map_err(|e| NotificationError::Scheduling(e.to_string()))?;

        for appointment in due_reminders {
            match self.send_reminder(appointment.id).await {
                Ok(true) => report.reminders_sent += 1,
                Ok(false) => report.reminder_failures += 1,
                Err(e) => {
                    warn!("Reminder for appointment {} failed: {}", appointment.id, e);
                    report.reminder_failures += 1;
                }
            }
        }

        let due_confirmations = booking
            .appointments_needing_confirmation(settings.confirmation_hours_before)
            .await
            .map_err(|e| NotificationError::Scheduling(e.to_string()))?;

        for appointment in due_confirmations {
            match self.send_confirmation(appointment.id).await {
                Ok(true) => report.confirmations_sent += 1,
                Ok(false) => report.confirmation_failures += 1,
                Err(e) => {
                    warn!(
                        "Confirmation for appointment {} failed: {}",
                        appointment.id, e
                    );
                    report.confirmation_failures += 1;
                }
            }
        }

        let predictor = NoShowPredictor::new(Arc::clone(&self.store));
        report.high_risk_appointments = predictor
            .high_risk_appointments(HIGH_RISK_LISTING_THRESHOLD)
            .await
            .map_err(|e| NotificationError::Prediction(e.to_string()))?
            .len();

        info!(
            "Notification sweep: {} reminders, {} confirmations, {} high-risk",
            report.reminders_sent, report.confirmations_sent, report.high_risk_appointments
        );
        Ok(report)
    }

    async fn participants(
        &self,
        appointment: &Appointment,
    ) -> Result<Option<(Patient, Doctor)>, NotificationError> {
        let patient = self.store.get_patient(appointment.patient_id).await?;
        let doctor = self.store.get_doctor(appointment.doctor_id).await?;
        Ok(patient.zip(doctor))
    }

    async fn clinic_name(&self) -> Result<String, NotificationError> {
        Ok(self
            .store
            .get_settings()
            .await?
            .map(|s| s.clinic_name)
            .unwrap_or_else(|| "Medical Clinic".to_string()))
    }
}
