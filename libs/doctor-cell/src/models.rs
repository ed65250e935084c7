use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use shared_models::WorkingWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: String,
    pub email: String,
    /// Keyed by lowercase weekday name ("monday" .. "sunday"); days
    /// without an entry are closed.
    pub working_hours: HashMap<String, WorkingWindow>,
    pub appointment_duration: Option<i32>,
    pub max_patients_per_day: Option<i32>,
}

pub const DEFAULT_APPOINTMENT_DURATION: i32 = 30;
pub const DEFAULT_MAX_PATIENTS_PER_DAY: i32 = 20;
