//! Authentication-related models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, FIELDS_REQUIRED};

/// Signup request
///
/// Fields are optional at the wire level so that an absent field is reported
/// as a missing-field validation error rather than a body-shape error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Validated signup fields
#[derive(Debug)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Check that every field is present and non-empty
    pub fn into_fields(self) -> Result<SignupFields, AppError> {
        self.validate()
            .map_err(|_| AppError::validation(FIELDS_REQUIRED))?;

        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) => Ok(SignupFields {
                name,
                email,
                password,
            }),
            _ => Err(AppError::validation(FIELDS_REQUIRED)),
        }
    }
}

/// Signin request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SigninRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Validated signin fields
#[derive(Debug)]
pub struct SigninFields {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    /// Check that both fields are present and non-empty
    pub fn into_fields(self) -> Result<SigninFields, AppError> {
        self.validate()
            .map_err(|_| AppError::validation(FIELDS_REQUIRED))?;

        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok(SigninFields { email, password }),
            _ => Err(AppError::validation(FIELDS_REQUIRED)),
        }
    }
}

/// Response carrying a freshly issued token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: &'static str,
    pub token: String,
}
