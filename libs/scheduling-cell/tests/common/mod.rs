use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use shared_models::{
    Appointment, AppointmentStatus, AppointmentType, ClinicSettings, CommunicationChannel, Doctor,
    InsuranceStatus, Patient, PatientStatus, WorkingWindow,
};
use shared_store::{ClinicStore, MemoryStore};

/// Monday 2025-07-07, used as the canonical open weekday in these tests.
pub const OPEN_MONDAY: (i32, u32, u32) = (2025, 7, 7);

pub fn open_monday() -> NaiveDate {
    let (y, m, d) = OPEN_MONDAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
        .and_utc()
}

pub fn weekday_doctor() -> Doctor {
    let window = WorkingWindow {
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    };
    let mut working_hours = HashMap::new();
    for day in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
        working_hours.insert(day.to_string(), window);
    }

    Doctor {
        id: Uuid::new_v4(),
        first_name: "Grace".to_string(),
        last_name: "Okafor".to_string(),
        specialty: "General Practice".to_string(),
        phone: "555-0199".to_string(),
        email: "g.okafor@example.com".to_string(),
        working_hours,
        appointment_duration: 30,
        max_patients_per_day: 20,
        is_active: true,
    }
}

pub fn active_patient() -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: "Maya".to_string(),
        last_name: "Lindqvist".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 12).unwrap(),
        phone: "555-0142".to_string(),
        email: "maya@example.com".to_string(),
        address: "12 Harbor Way".to_string(),
        emergency_contact: "Erik Lindqvist 555-0143".to_string(),
        insurance_provider: "blue_cross".to_string(),
        insurance_number: "ABC123456".to_string(),
        insurance_status: InsuranceStatus::Pending,
        status: PatientStatus::Active,
        no_show_count: 0,
        last_appointment: None,
        preferred_communication: CommunicationChannel::Phone,
        notes: String::new(),
        created_at: Utc::now(),
    }
}

/// Raw appointment row for store-level fixtures that bypass booking.
pub fn raw_appointment(
    patient_id: Uuid,
    doctor_id: Uuid,
    when: DateTime<Utc>,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        appointment_datetime: when,
        duration_minutes: 30,
        status,
        appointment_type: AppointmentType::General,
        notes: String::new(),
        insurance_verified: false,
        reminder_sent: false,
        confirmation_sent: false,
        created_at: when - chrono::Duration::days(5),
        updated_at: when - chrono::Duration::days(5),
    }
}

pub async fn seeded_store(doctor: &Doctor, patient: &Patient) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_doctor(doctor.clone()).await.unwrap();
    store.insert_patient(patient.clone()).await.unwrap();
    store
        .put_settings(ClinicSettings::default())
        .await
        .unwrap();
    store
}
