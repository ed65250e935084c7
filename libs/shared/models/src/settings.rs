use serde::{Deserialize, Serialize};

/// Singleton clinic configuration record, upserted wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub clinic_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub timezone: String,
    pub reminder_hours_before: i32,
    pub confirmation_hours_before: i32,
    pub no_show_threshold: i32,
    pub auto_reschedule_enabled: bool,
    pub insurance_verification_required: bool,
    pub cancellation_policy_hours: i32,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_name: "Medical Clinic".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            timezone: "America/New_York".to_string(),
            reminder_hours_before: 24,
            confirmation_hours_before: 2,
            no_show_threshold: 3,
            auto_reschedule_enabled: true,
            insurance_verification_required: true,
            cancellation_policy_hours: 24,
        }
    }
}
