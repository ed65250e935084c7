mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use scheduling_cell::services::AvailabilityService;
use shared_models::AppointmentStatus;
use shared_store::ClinicStore;

use common::{active_patient, at, open_monday, raw_appointment, seeded_store, weekday_doctor};

#[tokio::test]
async fn monday_without_bookings_yields_sixteen_half_hour_slots() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;
    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);

    let slots = availability
        .available_slots(doctor.id, open_monday(), None)
        .await
        .unwrap();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0], at(open_monday(), 9, 0));
    assert_eq!(*slots.last().unwrap(), at(open_monday(), 16, 30));
    for pair in slots.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::minutes(30));
    }
}

#[tokio::test]
async fn every_slot_fits_inside_the_working_window() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;
    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);

    let window_start = at(open_monday(), 9, 0);
    let window_end = at(open_monday(), 17, 0);

    let slots = availability
        .available_slots(doctor.id, open_monday(), Some(45))
        .await
        .unwrap();

    assert!(!slots.is_empty());
    for slot in &slots {
        assert!(*slot >= window_start);
        assert!(*slot + Duration::minutes(45) <= window_end);
        let offset = (*slot - window_start).num_minutes();
        assert_eq!(offset % 45, 0);
    }
}

#[tokio::test]
async fn closed_weekday_yields_no_slots() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;
    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);

    // 2025-07-06 is a Sunday; the roster only covers Monday-Friday.
    let sunday = NaiveDate::from_ymd_opt(2025, 7, 6).unwrap();
    let slots = availability
        .available_slots(doctor.id, sunday, None)
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn unknown_doctor_yields_no_slots() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;
    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);

    let slots = availability
        .available_slots(uuid::Uuid::new_v4(), open_monday(), None)
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn duration_longer_than_window_yields_no_slots() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;
    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);

    let slots = availability
        .available_slots(doctor.id, open_monday(), Some(8 * 60 + 30))
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn active_appointments_block_their_slot() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;

    let taken = at(open_monday(), 10, 0);
    store
        .insert_appointment(raw_appointment(
            patient.id,
            doctor.id,
            taken,
            AppointmentStatus::Confirmed,
        ))
        .await
        .unwrap();

    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);
    let slots = availability
        .available_slots(doctor.id, open_monday(), None)
        .await
        .unwrap();

    assert_eq!(slots.len(), 15);
    assert!(!slots.contains(&taken));
    assert!(slots.contains(&at(open_monday(), 9, 30)));
    assert!(slots.contains(&at(open_monday(), 10, 30)));
}

#[tokio::test]
async fn cancelled_and_no_show_appointments_free_their_slot() {
    let doctor = weekday_doctor();
    let patient = active_patient();
    let store = seeded_store(&doctor, &patient).await;

    store
        .insert_appointment(raw_appointment(
            patient.id,
            doctor.id,
            at(open_monday(), 10, 0),
            AppointmentStatus::Cancelled,
        ))
        .await
        .unwrap();
    store
        .insert_appointment(raw_appointment(
            patient.id,
            doctor.id,
            at(open_monday(), 11, 0),
            AppointmentStatus::NoShow,
        ))
        .await
        .unwrap();

    let availability = AvailabilityService::new(store as Arc<dyn ClinicStore>);
    let slots = availability
        .available_slots(doctor.id, open_monday(), None)
        .await
        .unwrap();

    assert_eq!(slots.len(), 16);
    assert!(slots.contains(&at(open_monday(), 10, 0)));
    assert!(slots.contains(&at(open_monday(), 11, 0)));
}
