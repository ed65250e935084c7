use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{
    Appointment, AppointmentStatus, CommunicationChannel, NoShowPrediction, Patient, PatientStatus,
};
use shared_store::{AppointmentFilter, ClinicStore};

use crate::models::{PatientRiskProfile, PredictionError};

/// Weights of the four sub-scores; they sum to 1.0.
const HISTORICAL_WEIGHT: f64 = 0.4;
const TIMING_WEIGHT: f64 = 0.25;
const DEMOGRAPHIC_WEIGHT: f64 = 0.2;
const FINANCIAL_WEIGHT: f64 = 0.15;

/// A factor label is attached whenever its sub-score crosses this value.
const FACTOR_THRESHOLD: f64 = 0.3;

/// Cold-start sub-score for patients with fewer than two appointments.
const NEW_PATIENT_HISTORICAL_RISK: f64 = 0.3;

const UNRELIABLE_PROVIDERS: [&str; 3] = ["medicaid", "medicare", "self_pay"];

pub struct NoShowPredictor {
    store: Arc<dyn ClinicStore>,
}

impl NoShowPredictor {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Score the no-show risk for one appointment and persist the
    /// prediction, replacing any earlier prediction for the same
    /// appointment. Deterministic given the persisted state and clock.
    pub async fn predict(
        &self,
        patient_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<NoShowPrediction, PredictionError> {
        let patient = self
            .store
            .get_patient(patient_id)
            .await?
            .ok_or(PredictionError::NotFound)?;
        let appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(PredictionError::NotFound)?;

        let history = self
            .store
            .list_appointments(AppointmentFilter::for_patient(patient_id))
            .await?;

        let now = Utc::now();
        let mut risk_factors = Vec::new();
        let mut risk_score = 0.0;

        let historical = historical_risk(&history, now);
        risk_score += historical * HISTORICAL_WEIGHT;
        if historical > FACTOR_THRESHOLD {
            risk_factors.push("High historical no-show rate".to_string());
        }

        let timing = timing_risk(&appointment);
        risk_score += timing * TIMING_WEIGHT;
        if timing > FACTOR_THRESHOLD {
            risk_factors.push("Unfavorable appointment timing".to_string());
        }

        let demographic = demographic_risk(&patient, now);
        risk_score += demographic * DEMOGRAPHIC_WEIGHT;
        if demographic > FACTOR_THRESHOLD {
            risk_factors.push("Demographic risk factors".to_string());
        }

        let financial = financial_risk(&patient, &appointment);
        risk_score += financial * FINANCIAL_WEIGHT;
        if financial > FACTOR_THRESHOLD {
            risk_factors.push("Insurance/financial concerns".to_string());
        }

        let prediction = NoShowPrediction {
            patient_id,
            appointment_id,
            risk_score: risk_score.clamp(0.0, 1.0),
            risk_factors,
            prediction_date: now,
        };

        self.store.upsert_prediction(prediction.clone()).await?;

        debug!(
            "Predicted risk {:.3} for appointment {}",
            prediction.risk_score, appointment_id
        );
        Ok(prediction)
    }

    /// Active appointments whose risk score reaches `threshold`. Missing
    /// predictions are computed on the fly.
    pub async fn high_risk_appointments(
        &self,
        threshold: f64,
    ) -> Result<Vec<(Appointment, NoShowPrediction)>, PredictionError> {
        let appointments = self
            .store
            .list_appointments(AppointmentFilter::default())
            .await?;

        let mut high_risk = Vec::new();
        for appointment in appointments {
            if !appointment.occupies_slot() {
                continue;
            }

            let prediction = match self.store.get_prediction(appointment.id).await? {
                Some(prediction) => prediction,
                None => {
                    self.predict(appointment.patient_id, appointment.id)
                        .await?
                }
            };

            if prediction.risk_score >= threshold {
                high_risk.push((appointment, prediction));
            }
        }

        if !high_risk.is_empty() {
            info!("{} appointments above risk threshold", high_risk.len());
        }
        Ok(high_risk)
    }

    /// Playbook of countermeasures for a given prediction.
    pub fn mitigation_recommendations(&self, prediction: &NoShowPrediction) -> Vec<String> {
        let mut recommendations = Vec::new();

        if prediction.risk_score > 0.7 {
            recommendations.push("Schedule multiple reminder calls".to_string());
            recommendations.push("Send SMS and email reminders".to_string());
            recommendations.push("Consider offering appointment rescheduling".to_string());
        }

        if prediction.risk_score > 0.5 {
            recommendations.push("Send confirmation call 24 hours before".to_string());
            recommendations.push("Verify insurance information".to_string());
        }

        for factor in &prediction.risk_factors {
            match factor.as_str() {
                "High historical no-show rate" => {
                    recommendations.push("Require deposit or pre-payment".to_string());
                    recommendations.push("Schedule during preferred time slots".to_string());
                }
                "Unfavorable appointment timing" => {
                    recommendations.push("Offer alternative time slots".to_string());
                    recommendations.push("Send extra reminder for timing".to_string());
                }
                "Insurance/financial concerns" => {
                    recommendations.push("Verify insurance coverage".to_string());
                    recommendations.push("Discuss payment options".to_string());
                }
                _ => {}
            }
        }

        recommendations
    }

    /// Aggregate risk picture for one patient.
    pub async fn patient_risk_profile(
        &self,
        patient_id: Uuid,
    ) -> Result<PatientRiskProfile, PredictionError> {
        let patient = self
            .store
            .get_patient(patient_id)
            .await?
            .ok_or(PredictionError::NotFound)?;

        let appointments = self
            .store
            .list_appointments(AppointmentFilter::for_patient(patient_id))
            .await?;

        let total = appointments.len();
        let no_shows = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::NoShow)
            .count();
        let completed = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count();

        let no_show_rate = if total > 0 {
            no_shows as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        // Latest pending appointment carries the current prediction, if any.
        let latest_prediction = match appointments
            .iter()
            .filter(|a| a.occupies_slot())
            .max_by_key(|a| a.appointment_datetime)
        {
            Some(latest) => self.store.get_prediction(latest.id).await?,
            None => None,
        };

        Ok(PatientRiskProfile {
            patient_id,
            patient_name: patient.full_name(),
            total_appointments: total,
            no_shows,
            completed,
            no_show_rate: (no_show_rate * 100.0).round() / 100.0,
            current_risk_score: latest_prediction.map(|p| p.risk_score).unwrap_or(0.0),
            risk_level: rate_risk_level(no_show_rate).to_string(),
            last_appointment: patient.last_appointment,
        })
    }
}

/// Historical sub-score: overall no-show fraction blended 30/70 with the
/// fraction over the last 90 days, scaled up and capped. Patients with
/// fewer than two appointments on file get the cold-start value.
pub fn historical_risk(appointments: &[Appointment], now: DateTime<Utc>) -> f64 {
    if appointments.len() < 2 {
        return NEW_PATIENT_HISTORICAL_RISK;
    }

    let no_shows = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::NoShow)
        .count();
    let mut no_show_rate = no_shows as f64 / appointments.len() as f64;

    let window_start = now - Duration::days(90);
    let recent: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.appointment_datetime > window_start)
        .collect();

    if !recent.is_empty() {
        let recent_no_shows = recent
            .iter()
            .filter(|a| a.status == AppointmentStatus::NoShow)
            .count();
        let recent_rate = recent_no_shows as f64 / recent.len() as f64;
        no_show_rate = no_show_rate * 0.3 + recent_rate * 0.7;
    }

    (no_show_rate * 2.0).min(1.0)
}

/// Timing sub-score from weekday, hour of day and booking lead time.
///
/// The 30-day and 60-day lead-time checks are independent, so a booking
/// made more than 60 days out collects both penalties.
pub fn timing_risk(appointment: &Appointment) -> f64 {
    let mut risk: f64 = 0.0;
    let when = appointment.appointment_datetime;

    match when.weekday() {
        Weekday::Mon => risk += 0.1,
        Weekday::Fri => risk += 0.15,
        Weekday::Sat | Weekday::Sun => risk += 0.2,
        _ => {}
    }

    let hour = when.hour();
    if hour < 9 || hour > 16 {
        risk += 0.1;
    } else if hour == 12 {
        risk += 0.05;
    }

    let days_advance = (when - appointment.created_at).num_days();
    if days_advance > 30 {
        risk += 0.1;
    }
    if days_advance > 60 {
        risk += 0.2;
    }
    if days_advance < 1 {
        risk += 0.15;
    }

    risk.min(1.0)
}

/// Demographic sub-score from age band, contact preference, current risk
/// status and emergency-contact quality.
pub fn demographic_risk(patient: &Patient, now: DateTime<Utc>) -> f64 {
    let mut risk: f64 = 0.0;

    let age = patient.age_years(now);
    if age < 25.0 {
        risk += 0.2;
    } else if age < 35.0 {
        risk += 0.1;
    } else if age > 65.0 {
        risk -= 0.1;
    }

    if patient.preferred_communication == CommunicationChannel::Email {
        risk += 0.05;
    }

    if patient.status == PatientStatus::HighRisk {
        risk += 0.3;
    }

    if patient.emergency_contact.trim().len() < 5 {
        risk += 0.1;
    }

    risk.clamp(0.0, 1.0)
}

/// Financial sub-score from verification state, provider reliability and
/// insurance-number plausibility.
pub fn financial_risk(patient: &Patient, appointment: &Appointment) -> f64 {
    let mut risk: f64 = 0.0;

    if !appointment.insurance_verified {
        risk += 0.2;
    }

    if UNRELIABLE_PROVIDERS.contains(&patient.insurance_provider.to_lowercase().as_str()) {
        risk += 0.1;
    }

    if patient.insurance_number.len() < 5 {
        risk += 0.15;
    }

    risk.min(1.0)
}

fn rate_risk_level(no_show_rate: f64) -> &'static str {
    if no_show_rate < 10.0 {
        "Low"
    } else if no_show_rate < 25.0 {
        "Medium"
    } else if no_show_rate < 40.0 {
        "High"
    } else {
        "Very High"
    }
}
