use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub insurance_provider: String,
    pub insurance_number: String,
    pub insurance_status: InsuranceStatus,
    pub status: PatientStatus,
    pub no_show_count: i32,
    pub last_appointment: Option<DateTime<Utc>>,
    pub preferred_communication: CommunicationChannel,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in fractional years at the given instant.
    pub fn age_years(&self, now: DateTime<Utc>) -> f64 {
        (now.date_naive() - self.date_of_birth).num_days() as f64 / 365.25
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Inactive,
    HighRisk,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Active => write!(f, "active"),
            PatientStatus::Inactive => write!(f, "inactive"),
            PatientStatus::HighRisk => write!(f, "high_risk"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceStatus {
    Verified,
    Pending,
    Expired,
    Invalid,
}

impl fmt::Display for InsuranceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceStatus::Verified => write!(f, "verified"),
            InsuranceStatus::Pending => write!(f, "pending"),
            InsuranceStatus::Expired => write!(f, "expired"),
            InsuranceStatus::Invalid => write!(f, "invalid"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationChannel {
    Phone,
    Email,
    Sms,
}

impl fmt::Display for CommunicationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationChannel::Phone => write!(f, "phone"),
            CommunicationChannel::Email => write!(f, "email"),
            CommunicationChannel::Sms => write!(f, "sms"),
        }
    }
}
