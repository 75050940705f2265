use chrono::NaiveDate;

use super::domain::{Gender, RegistrationSubmission, StudentId, StudentProfile};

/// Field-level rejection of a registration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationViolation {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("age must be between 1 and 120")]
    AgeOutOfRange,
    #[error("gender '{0}' is not recognised")]
    UnknownGender(String),
    #[error("date_of_birth must be YYYY-MM-DD")]
    InvalidDateOfBirth,
    #[error("mobile must contain 10 digits")]
    InvalidMobile,
    #[error("email address is malformed")]
    InvalidEmail,
}

pub(crate) fn validate(
    submission: RegistrationSubmission,
) -> Result<StudentProfile, RegistrationViolation> {
    let name = required("name", &submission.name)?;
    let school = required("school", &submission.school)?;

    let age = submission
        .age
        .ok_or(RegistrationViolation::MissingField { field: "age" })?;
    if !(1..=120).contains(&age) {
        return Err(RegistrationViolation::AgeOutOfRange);
    }

    let gender_raw = required("gender", &submission.gender)?;
    let gender =
        Gender::parse(&gender_raw).ok_or(RegistrationViolation::UnknownGender(gender_raw))?;

    let dob_raw = required("date_of_birth", &submission.date_of_birth)?;
    let date_of_birth = NaiveDate::parse_from_str(&dob_raw, "%Y-%m-%d")
        .map_err(|_| RegistrationViolation::InvalidDateOfBirth)?;

    let mobile = normalize_mobile(&required("mobile", &submission.mobile)?)?;
    let email = required("email", &submission.email)?;
    if !is_plausible_email(&email) {
        return Err(RegistrationViolation::InvalidEmail);
    }

    Ok(StudentProfile {
        student_id: StudentId(String::new()),
        name,
        age,
        gender,
        school,
        date_of_birth,
        mobile,
        email: email.to_ascii_lowercase(),
    })
}

fn required(field: &'static str, value: &str) -> Result<String, RegistrationViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistrationViolation::MissingField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_mobile(raw: &str) -> Result<String, RegistrationViolation> {
    let compact: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    let local = compact.strip_prefix("+91").unwrap_or(&compact);
    if local.len() == 10 && local.chars().all(|c| c.is_ascii_digit()) {
        Ok(local.to_string())
    } else {
        Err(RegistrationViolation::InvalidMobile)
    }
}

fn is_plausible_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}
