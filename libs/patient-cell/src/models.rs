use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::CommunicationChannel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub insurance_provider: String,
    pub insurance_number: String,
    pub preferred_communication: Option<CommunicationChannel>,
    pub notes: Option<String>,
}

/// All provided criteria must match; names compare case-insensitively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientSearchQuery {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
