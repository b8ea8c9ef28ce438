//! Error types for the onboarding core.

use crate::validate::ValidationErrors;
use thiserror::Error;

/// Onboarding error types.
///
/// None of these are fatal: every variant maps back to a known-good UI
/// state (re-show the form, or restart the flow at registration).
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// No pending draft exists (or the stored record was unusable). The
    /// only correct response is restarting at the registration page.
    #[error("no registration draft found")]
    NoDraft,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for OnboardingError {
    fn from(e: std::io::Error) -> Self {
        OnboardingError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for OnboardingError {
    fn from(e: serde_json::Error) -> Self {
        OnboardingError::Storage(format!("JSON serialization error: {}", e))
    }
}

impl From<ValidationErrors> for OnboardingError {
    fn from(e: ValidationErrors) -> Self {
        OnboardingError::Validation(e)
    }
}
