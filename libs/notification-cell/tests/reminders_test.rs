use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use notification_cell::models::NotificationError;
use notification_cell::services::sink::NotificationSink;
use notification_cell::services::NotificationService;
use shared_models::{
    Appointment, AppointmentStatus, AppointmentType, ClinicSettings, CommunicationChannel,
    Doctor, InsuranceStatus, NoShowPrediction, Patient, PatientStatus, WorkingWindow,
};
use shared_store::{ClinicStore, MemoryStore};

#[derive(Debug, Clone, PartialEq)]
struct Delivery {
    channel: CommunicationChannel,
    destination: String,
    subject: Option<String>,
    body: String,
}

/// Captures deliveries instead of sending them; can simulate outages.
struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
    healthy: bool,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            healthy: true,
        }
    }

    fn failing() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            healthy: false,
        }
    }

    async fn recorded(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(
        &self,
        channel: CommunicationChannel,
        destination: &str,
        subject: Option<&str>,
        body: &str,
    ) -> bool {
        if !self.healthy {
            return false;
        }
        self.deliveries.lock().await.push(Delivery {
            channel,
            destination: destination.to_string(),
            subject: subject.map(|s| s.to_string()),
            body: body.to_string(),
        });
        true
    }
}

fn email_patient() -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: "Nora".to_string(),
        last_name: "Szabo".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 11, 2).unwrap(),
        phone: "555-0111".to_string(),
        email: "nora@example.com".to_string(),
        address: "5 Mill Road".to_string(),
        emergency_contact: "Peter Szabo 555-0112".to_string(),
        insurance_provider: "blue_cross".to_string(),
        insurance_number: "ABC123456".to_string(),
        insurance_status: InsuranceStatus::Pending,
        status: PatientStatus::Active,
        no_show_count: 0,
        last_appointment: None,
        preferred_communication: CommunicationChannel::Email,
        notes: String::new(),
        created_at: Utc::now(),
    }
}

fn family_doctor() -> Doctor {
    let window = WorkingWindow {
        start: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    };
    let mut working_hours = std::collections::HashMap::new();
    working_hours.insert("monday".to_string(), window);

    Doctor {
        id: Uuid::new_v4(),
        first_name: "Sam".to_string(),
        last_name: "Whitfield".to_string(),
        specialty: "Family Medicine".to_string(),
        phone: "555-0120".to_string(),
        email: "s.whitfield@example.com".to_string(),
        working_hours,
        appointment_duration: 30,
        max_patients_per_day: 20,
        is_active: true,
    }
}

fn upcoming_appointment(patient_id: Uuid, doctor_id: Uuid) -> Appointment {
    let when = Utc::now() + Duration::hours(2);
    Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        appointment_datetime: when,
        duration_minutes: 30,
        status: AppointmentStatus::Scheduled,
        appointment_type: AppointmentType::General,
        notes: String::new(),
        insurance_verified: true,
        reminder_sent: false,
        confirmation_sent: false,
        created_at: Utc::now() - Duration::days(3),
        updated_at: Utc::now() - Duration::days(3),
    }
}

async fn seeded(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_patient(patient.clone()).await.unwrap();
    store.insert_doctor(doctor.clone()).await.unwrap();
    store.insert_appointment(appointment.clone()).await.unwrap();
    store.put_settings(ClinicSettings::default()).await.unwrap();
    store
}

#[tokio::test]
async fn reminders_render_for_the_preferred_channel_and_flip_the_flag() {
    let patient = email_patient();
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store.clone() as Arc<dyn ClinicStore>, sink.clone());

    assert!(service.send_reminder(appointment.id).await.unwrap());

    let deliveries = sink.recorded().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].channel, CommunicationChannel::Email);
    assert_eq!(deliveries[0].destination, patient.email);
    assert_eq!(
        deliveries[0].subject.as_deref(),
        Some("Appointment Reminder - Sam Whitfield")
    );
    assert!(deliveries[0].body.contains("Dear Nora"));
    assert!(deliveries[0].body.contains("Dr. Sam Whitfield"));

    let stored = store.get_appointment(appointment.id).await.unwrap().unwrap();
    assert!(stored.reminder_sent);
}

#[tokio::test]
async fn a_sent_reminder_is_not_delivered_twice() {
    let patient = email_patient();
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store as Arc<dyn ClinicStore>, sink.clone());

    assert!(service.send_reminder(appointment.id).await.unwrap());
    assert!(service.send_reminder(appointment.id).await.unwrap());

    assert_eq!(sink.recorded().await.len(), 1);
}

#[tokio::test]
async fn high_risk_predictions_escalate_the_wording() {
    let patient = email_patient();
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    store
        .upsert_prediction(NoShowPrediction {
            patient_id: patient.id,
            appointment_id: appointment.id,
            risk_score: 0.85,
            risk_factors: vec!["High historical no-show rate".to_string()],
            prediction_date: Utc::now(),
        })
        .await
        .unwrap();

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store as Arc<dyn ClinicStore>, sink.clone());

    assert!(service.send_reminder(appointment.id).await.unwrap());

    let deliveries = sink.recorded().await;
    assert!(deliveries[0]
        .subject
        .as_deref()
        .unwrap()
        .starts_with("URGENT"));
    assert!(deliveries[0].body.contains("IMPORTANT"));
}

#[tokio::test]
async fn sms_patients_get_the_short_form() {
    let mut patient = email_patient();
    patient.preferred_communication = CommunicationChannel::Sms;
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store as Arc<dyn ClinicStore>, sink.clone());

    assert!(service.send_reminder(appointment.id).await.unwrap());

    let deliveries = sink.recorded().await;
    assert_eq!(deliveries[0].channel, CommunicationChannel::Sms);
    assert_eq!(deliveries[0].destination, patient.phone);
    assert!(deliveries[0].subject.is_none());
    assert!(deliveries[0].body.contains("Dr. Whitfield"));
}

#[tokio::test]
async fn a_failed_delivery_leaves_the_flag_unset() {
    let patient = email_patient();
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::failing());
    let service = NotificationService::new(store.clone() as Arc<dyn ClinicStore>, sink);

    assert!(!service.send_reminder(appointment.id).await.unwrap());

    let stored = store.get_appointment(appointment.id).await.unwrap().unwrap();
    assert!(!stored.reminder_sent);
}

#[tokio::test]
async fn follow_ups_only_go_to_missed_appointments() {
    let patient = email_patient();
    let doctor = family_doctor();
    let mut appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store.clone() as Arc<dyn ClinicStore>, sink.clone());

    // Still scheduled: nothing to follow up on.
    assert!(!service.send_no_show_follow_up(appointment.id).await.unwrap());

    appointment.status = AppointmentStatus::NoShow;
    store.replace_appointment(appointment.clone()).await.unwrap();

    assert!(service.send_no_show_follow_up(appointment.id).await.unwrap());
    let deliveries = sink.recorded().await;
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries[0].body.contains("We noticed you missed"));
}

#[tokio::test]
async fn the_scheduled_sweep_counts_reminders_and_confirmations() {
    let patient = email_patient();
    let doctor = family_doctor();
    let appointment = upcoming_appointment(patient.id, doctor.id);
    let store = seeded(&patient, &doctor, &appointment).await;

    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store as Arc<dyn ClinicStore>, sink.clone());

    let report = service.process_scheduled().await.unwrap();

    assert_eq!(report.reminders_sent, 1);
    assert_eq!(report.confirmations_sent, 1);
    assert_eq!(report.reminder_failures, 0);
    assert_eq!(report.confirmation_failures, 0);
    assert_eq!(report.high_risk_appointments, 0);
    assert_eq!(sink.recorded().await.len(), 2);
}

#[tokio::test]
async fn the_sweep_requires_clinic_settings() {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::new());
    let service = NotificationService::new(store as Arc<dyn ClinicStore>, sink);

    let err = service.process_scheduled().await.unwrap_err();
    assert!(matches!(err, NotificationError::SettingsNotConfigured));
}
