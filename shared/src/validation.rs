//! Validation utilities for the Veridian platform
//!
//! Numeric checks guard the air quality arithmetic at the boundary; form
//! checks mirror what the account screens enforce before a request is sent.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{PollutantReading, ResearcherApplication, SignInForm, SignUpForm};
use crate::types::GpsCoordinates;

/// Rejected numeric input
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidInput { field, .. } => field,
        }
    }
}

// ============================================================================
// Measurement Validations
// ============================================================================

/// A concentration must be finite and non-negative
pub fn ensure_concentration(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::invalid(field, "cannot be negative"));
    }
    Ok(())
}

/// Validate every field of a reading
///
/// Pollutants and humidity must be finite and non-negative; temperature only
/// needs to be finite.
pub fn validate_reading(reading: &PollutantReading) -> Result<(), ValidationError> {
    ensure_concentration("pm25", reading.pm25)?;
    ensure_concentration("pm10", reading.pm10)?;
    ensure_concentration("no2", reading.no2)?;
    ensure_concentration("o3", reading.o3)?;
    ensure_concentration("co", reading.co)?;
    ensure_concentration("humidity", reading.humidity)?;
    if !reading.temperature.is_finite() {
        return Err(ValidationError::invalid("temperature", "must be a finite number"));
    }
    Ok(())
}

/// Validate a coordinate pair
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), ValidationError> {
    if !coordinates.latitude.is_finite() || !(-90.0..=90.0).contains(&coordinates.latitude) {
        return Err(ValidationError::invalid("latitude", "must be between -90 and 90"));
    }
    if !coordinates.longitude.is_finite() || !(-180.0..=180.0).contains(&coordinates.longitude) {
        return Err(ValidationError::invalid("longitude", "must be between -180 and 180"));
    }
    Ok(())
}

// ============================================================================
// Account Form Validations
// ============================================================================

/// Per-field messages collected from a form
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validate email format: something@something.something without whitespace
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let invalid = Err("Invalid email format");
    if email.chars().any(char::is_whitespace) {
        return invalid;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return invalid;
    };
    if local.is_empty() || domain.contains('@') {
        return invalid;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => invalid,
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate the sign-up form, collecting every failing field
pub fn validate_sign_up(form: &SignUpForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }

    if form.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if let Err(msg) = validate_email(&form.email) {
        errors.insert("email", msg);
    }

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if let Err(msg) = validate_password(&form.password) {
        errors.insert("password", msg);
    }

    if form.password != form.confirm_password {
        errors.insert("confirmPassword", "Passwords do not match");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the sign-in form
pub fn validate_sign_in(form: &SignInForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if let Err(msg) = validate_email(&form.email) {
        errors.insert("email", msg);
    }

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// All researcher fields are required
pub fn validate_researcher_application(
    application: &ResearcherApplication,
) -> Result<(), &'static str> {
    if application.institution.trim().is_empty()
        || application.research_id.trim().is_empty()
        || application.credentials.trim().is_empty()
    {
        return Err("Please fill in all fields");
    }
    Ok(())
}
