use std::env;
use tracing::warn;

use shared_models::ClinicSettings;

#[derive(Debug, Clone)]
pub struct ClinicConfig {
    pub clinic_name: String,
    pub clinic_address: String,
    pub clinic_phone: String,
    pub clinic_email: String,
    pub clinic_timezone: String,
    pub reminder_hours_before: i32,
    pub confirmation_hours_before: i32,
    pub no_show_threshold: i32,
    pub no_show_risk_threshold: f64,
    pub auto_reschedule_enabled: bool,
    pub insurance_verification_required: bool,
    pub cancellation_policy_hours: i32,
}

impl ClinicConfig {
    pub fn from_env() -> Self {
        Self {
            clinic_name: env_string("CLINIC_NAME", "MedAssist Medical Clinic"),
            clinic_address: env_string("CLINIC_ADDRESS", ""),
            clinic_phone: env_string("CLINIC_PHONE", ""),
            clinic_email: env_string("CLINIC_EMAIL", ""),
            clinic_timezone: env_string("CLINIC_TIMEZONE", "America/New_York"),
            reminder_hours_before: env_i32("DEFAULT_REMINDER_HOURS", 24),
            confirmation_hours_before: env_i32("DEFAULT_CONFIRMATION_HOURS", 2),
            no_show_threshold: env_i32("HIGH_RISK_PATIENT_THRESHOLD", 3),
            no_show_risk_threshold: env_f64("NO_SHOW_RISK_THRESHOLD", 0.6),
            auto_reschedule_enabled: env_bool("AUTO_RESCHEDULE_ENABLED", true),
            insurance_verification_required: env_bool("INSURANCE_VERIFICATION_REQUIRED", true),
            cancellation_policy_hours: env_i32("CANCELLATION_POLICY_HOURS", 24),
        }
    }

    /// Validate numeric settings; returns the list of problems found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.reminder_hours_before < 1 || self.reminder_hours_before > 168 {
            issues.push("DEFAULT_REMINDER_HOURS must be between 1 and 168".to_string());
        }
        if !(0.0..=1.0).contains(&self.no_show_risk_threshold) {
            issues.push("NO_SHOW_RISK_THRESHOLD must be between 0 and 1".to_string());
        }
        if self.no_show_threshold < 1 {
            issues.push("HIGH_RISK_PATIENT_THRESHOLD must be at least 1".to_string());
        }

        issues
    }

    /// The singleton settings record seeded into the store at startup.
    pub fn clinic_settings(&self) -> ClinicSettings {
        ClinicSettings {
            clinic_name: self.clinic_name.clone(),
            address: self.clinic_address.clone(),
            phone: self.clinic_phone.clone(),
            email: self.clinic_email.clone(),
            timezone: self.clinic_timezone.clone(),
            reminder_hours_before: self.reminder_hours_before,
            confirmation_hours_before: self.confirmation_hours_before,
            no_show_threshold: self.no_show_threshold,
            auto_reschedule_enabled: self.auto_reschedule_enabled,
            insurance_verification_required: self.insurance_verification_required,
            cancellation_policy_hours: self.cancellation_policy_hours,
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_i32(key: &str, default: i32) -> i32 {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid integer, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid number, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => value.eq_ignore_ascii_case("true") || value == "1",
        Err(_) => default,
    }
}
