//! Wasla onboarding core - registration draft capture and OTP verification.
//!
//! Two-step flow: the registration controller validates and normalizes the
//! form input, persists a single pending [`Draft`], and hands off to the
//! [`OtpSession`], which owns the resend countdown and the verification
//! outcomes. Rendering, theming and the real backend stay outside; the
//! draft store, the navigator and the mocked network are injected
//! collaborators.

pub mod config;
pub mod draft;
pub mod error;
pub mod nav;
pub mod net;
pub mod otp;
pub mod phone;
pub mod registration;
pub mod store;
pub mod validate;

pub use config::Config;
pub use draft::Draft;
pub use error::OnboardingError;
pub use nav::{Navigator, Page};
pub use otp::{OtpSession, OtpState, ResendOutcome, VerifyOutcome};
pub use registration::{RegistrationController, RegistrationInput};
pub use store::DraftStore;
pub use validate::{Field, Role, ValidationErrors};
