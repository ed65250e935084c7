use shared_models::{Appointment, Doctor, Patient};

/// Human-readable appointment time, e.g. "July 07, 2025 at 09:00 AM".
pub fn format_appointment_time(appointment: &Appointment) -> String {
    appointment
        .appointment_datetime
        .format("%B %d, %Y at %I:%M %p")
        .to_string()
}

pub fn reminder_subject(doctor: &Doctor, high_risk: bool) -> String {
    if high_risk {
        format!("URGENT: Appointment Reminder - {}", doctor.full_name())
    } else {
        format!("Appointment Reminder - {}", doctor.full_name())
    }
}

pub fn standard_reminder_email(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    clinic_name: &str,
) -> String {
    format!(
        "Dear {},\n\n\
         This is a friendly reminder about your upcoming appointment:\n\n\
         Doctor: Dr. {}\n\
         Specialty: {}\n\
         Date & Time: {}\n\
         Duration: {} minutes\n\
         Appointment Type: {}\n\n\
         Please arrive 15 minutes early for check-in. If you need to reschedule or cancel, \
         please call us at least 24 hours in advance.\n\n\
         We look forward to seeing you!\n\n\
         Best regards,\n{}",
        patient.first_name,
        doctor.full_name(),
        doctor.specialty,
        format_appointment_time(appointment),
        appointment.duration_minutes,
        appointment.appointment_type,
        clinic_name,
    )
}

pub fn high_risk_reminder_email(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    clinic_name: &str,
) -> String {
    format!(
        "Dear {},\n\n\
         IMPORTANT: This is an urgent reminder about your upcoming appointment:\n\n\
         Doctor: Dr. {}\n\
         Specialty: {}\n\
         Date & Time: {}\n\
         Duration: {} minutes\n\
         Appointment Type: {}\n\n\
         Please confirm your attendance by replying to this email or calling us immediately. \
         If you need to reschedule, please contact us as soon as possible.\n\n\
         We understand that circumstances can change, but please let us know so we can help \
         other patients who may need this time slot.\n\n\
         Thank you for your attention to this matter.\n\n\
         Best regards,\n{}",
        patient.first_name,
        doctor.full_name(),
        doctor.specialty,
        format_appointment_time(appointment),
        appointment.duration_minutes,
        appointment.appointment_type,
        clinic_name,
    )
}

pub fn reminder_sms(doctor: &Doctor, appointment: &Appointment, high_risk: bool) -> String {
    let appointment_time = format_appointment_time(appointment);
    if high_risk {
        format!(
            "URGENT: Your appointment with Dr. {} is coming up at {}. \
             Please confirm by replying YES or call us to reschedule.",
            doctor.last_name, appointment_time
        )
    } else {
        format!(
            "Reminder: Your appointment with Dr. {} is coming up at {}. Reply YES to confirm.",
            doctor.last_name, appointment_time
        )
    }
}

pub fn confirmation_subject(doctor: &Doctor) -> String {
    format!("Please Confirm Your Appointment - {}", doctor.full_name())
}

pub fn confirmation_email(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    clinic_name: &str,
) -> String {
    format!(
        "Dear {},\n\n\
         Please confirm your appointment:\n\n\
         Doctor: Dr. {}\n\
         Date & Time: {}\n\
         Duration: {} minutes\n\n\
         Please reply to this email with \"CONFIRM\" to confirm your appointment, or \
         \"CANCEL\" if you need to cancel.\n\n\
         If you need to reschedule, please call us as soon as possible.\n\n\
         Thank you!\n\n\
         Best regards,\n{}",
        patient.first_name,
        doctor.full_name(),
        format_appointment_time(appointment),
        appointment.duration_minutes,
        clinic_name,
    )
}

pub fn confirmation_sms(doctor: &Doctor, appointment: &Appointment) -> String {
    format!(
        "Please confirm your appointment with Dr. {} at {}. \
         Reply YES to confirm or NO to cancel.",
        doctor.last_name,
        format_appointment_time(appointment)
    )
}

pub fn no_show_followup_subject() -> String {
    "We Missed You - Reschedule Your Appointment".to_string()
}

pub fn no_show_followup_email(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    clinic_name: &str,
) -> String {
    format!(
        "Dear {},\n\n\
         We noticed you missed your appointment with Dr. {} on {}.\n\n\
         We understand that things come up, and we're here to help. Please call us to \
         reschedule your appointment at your convenience.\n\n\
         We're committed to providing you with the best care, and we look forward to \
         seeing you soon.\n\n\
         Best regards,\n{}",
        patient.first_name,
        doctor.last_name,
        format_appointment_time(appointment),
        clinic_name,
    )
}

pub fn no_show_followup_sms(doctor: &Doctor) -> String {
    format!(
        "We missed you at your appointment with Dr. {}. \
         Please call us to reschedule. We're here to help!",
        doctor.last_name
    )
}

pub fn cancellation_subject(doctor: &Doctor) -> String {
    format!("Appointment Cancelled - {}", doctor.full_name())
}

pub fn cancellation_email(
    patient: &Patient,
    doctor: &Doctor,
    appointment: &Appointment,
    reason: &str,
    clinic_name: &str,
) -> String {
    let reason_line = if reason.is_empty() {
        String::new()
    } else {
        format!("Reason: {}\n\n", reason)
    };

    format!(
        "Dear {},\n\n\
         Your appointment with Dr. {} on {} has been cancelled.\n\n\
         {}\
         Please call us to reschedule at your convenience.\n\n\
         Best regards,\n{}",
        patient.first_name,
        doctor.last_name,
        format_appointment_time(appointment),
        reason_line,
        clinic_name,
    )
}

pub fn cancellation_sms(doctor: &Doctor, appointment: &Appointment) -> String {
    format!(
        "Your appointment with Dr. {} on {} has been cancelled. \
         Please call us to reschedule.",
        doctor.last_name,
        format_appointment_time(appointment)
    )
}
