use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, PatientStatus};
use shared_store::{AppointmentFilter, ClinicStore};

use crate::models::{
    AnalyticsError, AppointmentStatistics, ClinicDashboard, NoShowPatterns, RevenueAnalytics,
};

/// Average billed value of one appointment, used for revenue estimates.
const AVG_APPOINTMENT_VALUE: f64 = 150.0;

// Share of a cancelled appointment's value assumed recoverable by refilling
// the slot.
const CANCELLATION_RECOVERY: f64 = 0.5;

pub struct AnalyticsService {
    store: Arc<dyn ClinicStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn appointment_statistics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AppointmentStatistics, AnalyticsError> {
        let appointments = self.appointments_in_range(start, end).await?;

        let mut status_breakdown: HashMap<String, usize> = HashMap::new();
        let mut appointment_types: HashMap<String, usize> = HashMap::new();
        for appointment in &appointments {
            *status_breakdown
                .entry(appointment.status.to_string())
                .or_insert(0) += 1;
            *appointment_types
                .entry(appointment.appointment_type.to_string())
                .or_insert(0) += 1;
        }

        let completed = count_status(&appointments, AppointmentStatus::Completed);
        let no_shows = count_status(&appointments, AppointmentStatus::NoShow);
        let cancelled = count_status(&appointments, AppointmentStatus::Cancelled);
        let scheduled = count_status(&appointments, AppointmentStatus::Scheduled);
        let confirmed = count_status(&appointments, AppointmentStatus::Confirmed);

        let attempted = completed + no_shows + cancelled;

        Ok(AppointmentStatistics {
            total_appointments: appointments.len(),
            status_breakdown,
            no_show_rate: percentage(no_shows, attempted),
            completion_rate: percentage(completed, attempted),
            cancellation_rate: percentage(cancelled, attempted),
            appointment_types,
            pending_appointments: scheduled + confirmed,
        })
    }

    pub async fn revenue_analytics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RevenueAnalytics, AnalyticsError> {
        let appointments = self.appointments_in_range(start, end).await?;

        let completed = count_status(&appointments, AppointmentStatus::Completed);
        let no_shows = count_status(&appointments, AppointmentStatus::NoShow);
        let cancelled = count_status(&appointments, AppointmentStatus::Cancelled);

        let actual_revenue = completed as f64 * AVG_APPOINTMENT_VALUE;
        let potential_revenue = appointments.len() as f64 * AVG_APPOINTMENT_VALUE;
        let lost_no_shows = no_shows as f64 * AVG_APPOINTMENT_VALUE;
        let lost_cancellations =
            cancelled as f64 * AVG_APPOINTMENT_VALUE * CANCELLATION_RECOVERY;

        let insurance_verified = appointments.iter().filter(|a| a.insurance_verified).count();

        Ok(RevenueAnalytics {
            actual_revenue,
            potential_revenue,
            lost_revenue_no_shows: lost_no_shows,
            lost_revenue_cancellations: lost_cancellations,
            total_lost_revenue: lost_no_shows + lost_cancellations,
            revenue_efficiency: if potential_revenue > 0.0 {
                actual_revenue / potential_revenue * 100.0
            } else {
                0.0
            },
            insurance_collection_rate: percentage(insurance_verified, appointments.len()),
            avg_appointment_value: AVG_APPOINTMENT_VALUE,
        })
    }

    /// Where the no-shows cluster: weekday, hour of day, repeat offenders.
    pub async fn no_show_patterns(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<NoShowPatterns, AnalyticsError> {
        let appointments = self.appointments_in_range(start, end).await?;

        let mut by_day: HashMap<String, usize> = HashMap::new();
        let mut by_hour: HashMap<u32, usize> = HashMap::new();
        let mut by_patient: HashMap<Uuid, usize> = HashMap::new();

        for appointment in appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::NoShow)
        {
            let day = weekday_name(appointment.appointment_datetime.weekday());
            *by_day.entry(day.to_string()).or_insert(0) += 1;
            *by_hour
                .entry(appointment.appointment_datetime.hour())
                .or_insert(0) += 1;
            *by_patient.entry(appointment.patient_id).or_insert(0) += 1;
        }

        let mut top_no_show_patients: Vec<(Uuid, usize)> = by_patient.into_iter().collect();
        top_no_show_patients.sort_by(|a, b| b.1.cmp(&a.1));
        top_no_show_patients.truncate(10);

        Ok(NoShowPatterns {
            by_day,
            by_hour,
            top_no_show_patients,
        })
    }

    pub async fn dashboard(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ClinicDashboard, AnalyticsError> {
        debug!("Building clinic dashboard for {} - {}", start, end);

        let high_risk_patient_count = self
            .store
            .list_patients()
            .await?
            .iter()
            .filter(|p| p.status == PatientStatus::HighRisk)
            .count();

        Ok(ClinicDashboard {
            appointment_statistics: self.appointment_statistics(start, end).await?,
            revenue_analytics: self.revenue_analytics(start, end).await?,
            no_show_patterns: self.no_show_patterns(start, end).await?,
            high_risk_patient_count,
        })
    }

    async fn appointments_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AnalyticsError> {
        Ok(self
            .store
            .list_appointments(AppointmentFilter::default().between(start, end))
            .await?)
    }
}

fn count_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let rate = part as f64 / whole as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}
