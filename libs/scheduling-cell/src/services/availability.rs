use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_store::{AppointmentFilter, ClinicStore};

use crate::models::SchedulingError;

/// Computes bookable start times for a doctor on a given date. Read-only;
/// never writes through the gateway.
#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn ClinicStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Ordered bookable start times for the doctor on `date`.
    ///
    /// An unknown doctor or a weekday without a working-hours entry is a
    /// valid "closed" outcome and yields an empty list rather than an
    /// error. The duration defaults to the doctor's configured slot
    /// length.
    ///
    /// A candidate conflicts with an existing appointment when the
    /// distance between their start times is under one slot length. This
    /// only prevents overlap while every appointment shares the queried
    /// duration; mixed-duration schedules can mis-detect and callers
    /// should keep a doctor's bookings on a single duration.
    pub async fn available_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        duration_minutes: Option<i32>,
    ) -> Result<Vec<DateTime<Utc>>, SchedulingError> {
        let Some(doctor) = self.store.get_doctor(doctor_id).await? else {
            debug!("No slots: doctor {} unknown", doctor_id);
            return Ok(Vec::new());
        };

        let duration = duration_minutes.unwrap_or(doctor.appointment_duration);
        if duration <= 0 {
            return Ok(Vec::new());
        }

        let Some(window) = doctor.working_window_for(date.weekday()) else {
            debug!("No slots: doctor {} not working on {}", doctor_id, date);
            return Ok(Vec::new());
        };

        let start_of_day = date.and_time(window.start).and_utc();
        let end_of_day = date.and_time(window.end).and_utc();

        let existing = self
            .store
            .list_appointments(
                AppointmentFilter::for_doctor(doctor_id).between(start_of_day, end_of_day),
            )
            .await?;

        let occupied: Vec<DateTime<Utc>> = existing
            .iter()
            .filter(|apt| apt.occupies_slot())
            .map(|apt| apt.appointment_datetime)
            .collect();

        let step = Duration::minutes(duration as i64);
        let min_gap_seconds = duration as i64 * 60;

        let mut slots = Vec::new();
        let mut current = start_of_day;
        while current + step <= end_of_day {
            let conflict = occupied
                .iter()
                .any(|taken| (current - *taken).num_seconds().abs() < min_gap_seconds);

            if !conflict {
                slots.push(current);
            }

            current += step;
        }

        debug!(
            "Doctor {} has {} open slots on {} at {} minutes",
            doctor_id,
            slots.len(),
            date,
            duration
        );
        Ok(slots)
    }
}
