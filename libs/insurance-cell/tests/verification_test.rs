use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use insurance_cell::services::InsuranceVerificationService;
use shared_models::{
    Appointment, AppointmentStatus, AppointmentType, CommunicationChannel, InsuranceStatus,
    Patient, PatientStatus,
};
use shared_store::{ClinicStore, MemoryStore};

fn insured_patient(provider: &str, number: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: "Omar".to_string(),
        last_name: "Haddad".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1978, 9, 23).unwrap(),
        phone: "555-0188".to_string(),
        email: "omar@example.com".to_string(),
        address: "3 Birch Lane".to_string(),
        emergency_contact: "Lina Haddad 555-0189".to_string(),
        insurance_provider: provider.to_string(),
        insurance_number: number.to_string(),
        insurance_status: InsuranceStatus::Pending,
        status: PatientStatus::Active,
        no_show_count: 0,
        last_appointment: None,
        preferred_communication: CommunicationChannel::Phone,
        notes: String::new(),
        created_at: Utc::now(),
    }
}

fn pending_appointment(patient_id: Uuid) -> Appointment {
    let when = Utc.with_ymd_and_hms(2025, 7, 8, 10, 0, 0).unwrap();
    Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id: Uuid::new_v4(),
        appointment_datetime: when,
        duration_minutes: 30,
        status: AppointmentStatus::Scheduled,
        appointment_type: AppointmentType::General,
        notes: String::new(),
        insurance_verified: false,
        reminder_sent: false,
        confirmation_sent: false,
        created_at: when - Duration::days(5),
        updated_at: when - Duration::days(5),
    }
}

async fn store_with(patient: &Patient, appointment: &Appointment) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_patient(patient.clone()).await.unwrap();
    store.insert_appointment(appointment.clone()).await.unwrap();
    store
}

#[tokio::test]
async fn a_well_formed_policy_verifies_and_updates_both_records() {
    let patient = insured_patient("Blue Cross", "ABC123456");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;

    let service = InsuranceVerificationService::new(store.clone() as Arc<dyn ClinicStore>);
    let outcome = service.verify(patient.id, appointment.id).await.unwrap();

    assert_eq!(outcome.status, InsuranceStatus::Verified);
    let coverage = outcome.coverage.unwrap();
    assert!(coverage.active);
    assert_eq!(coverage.copay, 25.0);

    let stored_patient = store.get_patient(patient.id).await.unwrap().unwrap();
    assert_eq!(stored_patient.insurance_status, InsuranceStatus::Verified);

    let stored_appointment = store.get_appointment(appointment.id).await.unwrap().unwrap();
    assert!(stored_appointment.insurance_verified);
}

#[tokio::test]
async fn a_suspended_policy_reports_expired_coverage() {
    // Aetna numbers are nine digits; a trailing zero marks a suspended
    // policy in the simulated coverage table.
    let patient = insured_patient("aetna", "123456780");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;

    let service = InsuranceVerificationService::new(store.clone() as Arc<dyn ClinicStore>);
    let outcome = service.verify(patient.id, appointment.id).await.unwrap();

    assert_eq!(outcome.status, InsuranceStatus::Expired);
    assert_eq!(
        outcome.coverage.unwrap().reason.as_deref(),
        Some("Policy suspended")
    );

    let stored_appointment = store.get_appointment(appointment.id).await.unwrap().unwrap();
    assert!(!stored_appointment.insurance_verified);
}

#[tokio::test]
async fn malformed_numbers_and_unknown_providers_are_invalid() {
    let patient = insured_patient("blue_cross", "12345");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let outcome = service.verify(patient.id, appointment.id).await.unwrap();
    assert_eq!(outcome.status, InsuranceStatus::Invalid);

    let patient = insured_patient("acme_health", "ABC123456");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let outcome = service.verify(patient.id, appointment.id).await.unwrap();
    assert_eq!(outcome.status, InsuranceStatus::Invalid);
    assert!(outcome.message.contains("Unknown insurance provider"));
}

#[tokio::test]
async fn responsibility_pays_down_the_deductible_first() {
    // Blue Cross carries a 500 deductible; with 200 assumed met, the
    // remaining 300 exceeds the 150 visit, so the patient pays it all.
    let patient = insured_patient("blue_cross", "ABC123456");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let responsibility = service
        .patient_responsibility(patient.id, appointment.id, None)
        .await
        .unwrap();

    assert_eq!(responsibility.total_cost, 150.0);
    assert_eq!(responsibility.patient_responsibility, 150.0);
    assert_eq!(responsibility.deductible, 150.0);
    assert_eq!(responsibility.copay, 0.0);
    assert_eq!(responsibility.insurance_coverage, 0.0);
    assert!(responsibility.payment_required);
}

#[tokio::test]
async fn responsibility_falls_back_to_the_copay_once_the_deductible_is_met() {
    // Kaiser has no deductible, so only the 15 copay applies.
    let patient = insured_patient("kaiser", "1234567892");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let responsibility = service
        .patient_responsibility(patient.id, appointment.id, None)
        .await
        .unwrap();

    assert_eq!(responsibility.patient_responsibility, 15.0);
    assert_eq!(responsibility.copay, 15.0);
    assert_eq!(responsibility.insurance_coverage, 135.0);
}

#[tokio::test]
async fn unverified_coverage_means_full_payment() {
    let patient = insured_patient("blue_cross", "bad-format");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let responsibility = service
        .patient_responsibility(patient.id, appointment.id, Some(200.0))
        .await
        .unwrap();

    assert_eq!(responsibility.patient_responsibility, 200.0);
    assert_eq!(responsibility.insurance_coverage, 0.0);
    assert!(responsibility.payment_required);
}

#[tokio::test]
async fn large_balances_unlock_plans_and_assistance() {
    let patient = insured_patient("blue_cross", "ABC123456");
    let appointment = pending_appointment(patient.id);
    let store = store_with(&patient, &appointment).await;
    let service = InsuranceVerificationService::new(store as Arc<dyn ClinicStore>);

    let options = service.payment_options(patient.id, 600.0).await.unwrap();
    let types: Vec<&str> = options.iter().map(|o| o.option_type.as_str()).collect();

    assert!(types.contains(&"cash"));
    assert!(types.contains(&"credit_card"));
    assert!(types.contains(&"payment_plan"));
    assert!(types.contains(&"financial_assistance"));

    let plan = options
        .iter()
        .find(|o| o.option_type == "payment_plan")
        .unwrap();
    assert_eq!(plan.installments, Some(3));
    assert_eq!(plan.amount, 200.0);
}
