//! Registration form orchestration.

use crate::config::{Config, NetworkConfig};
use crate::draft::Draft;
use crate::error::OnboardingError;
use crate::nav::{Navigator, Page};
use crate::net::simulate_network;
use crate::phone::normalize_phone;
use crate::store::DraftStore;
use crate::validate::{self, Field, Role, ValidationErrors};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Raw form values as captured from the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    /// Selected role radio value, empty when nothing is selected
    pub role: String,
    pub terms_accepted: bool,
}

/// Fields that survived validation, ready to become a draft. The password
/// is checked but never carried past the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub full_name: String,
    pub phone_e164: String,
    pub email: String,
    pub role: Role,
}

/// Re-display values restored from an existing draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefill {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
}

/// Validates the form, persists the resulting draft and hands the flow
/// off to the verification stage.
pub struct RegistrationController {
    store: Arc<DraftStore>,
    navigator: Arc<dyn Navigator>,
    network: NetworkConfig,
}

impl RegistrationController {
    pub fn new(store: Arc<DraftStore>, navigator: Arc<dyn Navigator>, config: &Config) -> Self {
        Self {
            store,
            navigator,
            network: config.network.clone(),
        }
    }

    /// Run every field check against the raw input. All failing fields are
    /// reported together so the form can flag them at once. Pure: no store
    /// or timer is touched.
    pub fn validate(input: &RegistrationInput) -> Result<ValidatedInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validate::full_name_ok(&input.full_name) {
            errors.push(Field::FullName, validate::MSG_FULL_NAME);
        }

        let phone_e164 = match normalize_phone(&input.phone) {
            Ok(p) => Some(p),
            Err(_) => {
                errors.push(Field::Phone, validate::MSG_PHONE);
                None
            }
        };

        if !validate::email_ok(&input.email) {
            errors.push(Field::Email, validate::MSG_EMAIL);
        }

        if !validate::password_acceptable(&input.password) {
            errors.push(Field::Password, validate::MSG_PASSWORD);
        }

        let role = match Role::parse(&input.role) {
            Some(r) => Some(r),
            None => {
                errors.push(Field::Role, validate::MSG_ROLE);
                None
            }
        };

        if !input.terms_accepted {
            errors.push(Field::Terms, validate::MSG_TERMS);
        }

        match (phone_e164, role) {
            (Some(phone_e164), Some(role)) if errors.is_empty() => Ok(ValidatedInput {
                full_name: input.full_name.trim().to_string(),
                phone_e164,
                email: input.email.trim().to_lowercase(),
                role,
            }),
            _ => Err(errors),
        }
    }

    /// Submit the form.
    ///
    /// On any failing check the errors are returned and nothing is written.
    /// On success the mocked backend call runs, a fresh draft replaces
    /// whatever the store held (exactly one write), and the flow moves to
    /// the verification page.
    pub async fn submit(&self, input: &RegistrationInput) -> Result<Draft, OnboardingError> {
        let validated = match Self::validate(input) {
            Ok(v) => v,
            Err(errors) => {
                warn!(fields = errors.len(), "registration rejected by validation");
                return Err(OnboardingError::Validation(errors));
            }
        };

        simulate_network(self.network.submit_delay_ms).await;

        let draft = Draft::new(
            validated.full_name,
            input.phone.clone(),
            validated.phone_e164,
            validated.email,
            validated.role,
            Utc::now(),
        );
        self.store.set(&draft).await?;

        info!(
            verification_id = %draft.verification_id,
            phone = %draft.phone_e164,
            "registration draft saved, awaiting verification"
        );
        self.navigator.navigate_to(Page::Verify);
        Ok(draft)
    }

    /// Restore re-display values from a previously saved draft, if any.
    /// Falls back to the canonical number when the raw input was lost.
    pub async fn prefill(&self) -> Result<Option<Prefill>, OnboardingError> {
        Ok(self.store.get().await?.map(|draft| Prefill {
            full_name: draft.full_name,
            phone: if draft.phone_raw.is_empty() {
                draft.phone_e164
            } else {
                draft.phone_raw
            },
            email: draft.email,
            role: draft.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::LoggingNavigator;
    use std::sync::Mutex;

    /// Navigator that records every transition, for assertions.
    #[derive(Default)]
    struct RecordingNavigator {
        pages: Mutex<Vec<Page>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to(&self, page: Page) {
            self.pages.lock().unwrap().push(page);
        }
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            full_name: "Sara Ali".into(),
            phone: "0512345678".into(),
            email: "".into(),
            password: "Passw0rd!".into(),
            role: "provider".into(),
            terms_accepted: true,
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.network.submit_delay_ms = 0;
        config.network.verify_delay_ms = 0;
        config
    }

    #[test]
    fn test_validate_accepts_and_normalizes() {
        let mut input = valid_input();
        input.full_name = "  Sara Ali  ".into();
        input.email = "  SARA@Example.COM ".into();

        let validated = RegistrationController::validate(&input).unwrap();
        assert_eq!(validated.full_name, "Sara Ali");
        assert_eq!(validated.phone_e164, "+966512345678");
        assert_eq!(validated.email, "sara@example.com");
        assert_eq!(validated.role, Role::Provider);
    }

    #[test]
    fn test_validate_reports_all_failing_fields() {
        let input = RegistrationInput {
            full_name: "x".into(),
            phone: "12345".into(),
            email: "not-an-email".into(),
            password: "weak".into(),
            role: "".into(),
            terms_accepted: false,
        };

        let errors = RegistrationController::validate(&input).unwrap_err();
        assert_eq!(errors.len(), 6);
        for field in [
            Field::FullName,
            Field::Phone,
            Field::Email,
            Field::Password,
            Field::Role,
            Field::Terms,
        ] {
            assert!(errors.contains(field), "missing {:?}", field);
        }
    }

    #[tokio::test]
    async fn test_submit_writes_exactly_once_and_navigates() {
        let store = Arc::new(DraftStore::memory());
        let navigator = Arc::new(RecordingNavigator::default());
        let controller =
            RegistrationController::new(store.clone(), navigator.clone(), &test_config());

        let draft = controller.submit(&valid_input()).await.unwrap();

        assert_eq!(draft.phone_e164, "+966512345678");
        assert_eq!(draft.phone_raw, "0512345678");
        assert!(!draft.verified);
        assert_eq!(store.write_count(), 1);
        assert_eq!(*navigator.pages.lock().unwrap(), vec![Page::Verify]);
        assert_eq!(store.get().await.unwrap(), Some(draft));
    }

    #[tokio::test]
    async fn test_invalid_phone_fails_with_zero_writes() {
        let store = Arc::new(DraftStore::memory());
        let navigator = Arc::new(RecordingNavigator::default());
        let controller =
            RegistrationController::new(store.clone(), navigator.clone(), &test_config());

        let mut input = valid_input();
        input.phone = "12345".into();

        let err = controller.submit(&input).await.unwrap_err();
        match err {
            OnboardingError::Validation(errors) => {
                assert!(errors.contains(Field::Phone));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert_eq!(store.write_count(), 0);
        assert!(store.get().await.unwrap().is_none());
        assert!(navigator.pages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_new_registration_overwrites_prior_draft() {
        let store = Arc::new(DraftStore::memory());
        let controller = RegistrationController::new(
            store.clone(),
            Arc::new(LoggingNavigator),
            &test_config(),
        );

        let first = controller.submit(&valid_input()).await.unwrap();

        let mut input = valid_input();
        input.phone = "0598765432".into();
        let second = controller.submit(&input).await.unwrap();

        assert_ne!(first.verification_id, second.verification_id);
        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.phone_e164, "+966598765432");
    }

    #[tokio::test]
    async fn test_prefill_round_trip() {
        let store = Arc::new(DraftStore::memory());
        let controller = RegistrationController::new(
            store.clone(),
            Arc::new(LoggingNavigator),
            &test_config(),
        );

        assert!(controller.prefill().await.unwrap().is_none());

        controller.submit(&valid_input()).await.unwrap();

        let prefill = controller.prefill().await.unwrap().unwrap();
        assert_eq!(prefill.full_name, "Sara Ali");
        assert_eq!(prefill.phone, "0512345678"); // raw input, not canonical
        assert_eq!(prefill.role, Role::Provider);
    }
}
