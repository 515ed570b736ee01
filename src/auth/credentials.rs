//! Client-side checks for the sign-in and sign-up forms

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::SignUpRequest;
use crate::survey::ValidationError;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_sign_up(request: &SignUpRequest) -> Result<(), ValidationError> {
    if request.full_name.trim().is_empty() || request.organization.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    validate_sign_in(&request.email, &request.password)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
