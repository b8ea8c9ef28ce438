//! Page navigation collaborator.

use tracing::info;

/// Pages of the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Registration form entry point
    Register,
    /// OTP verification stage
    Verify,
    /// Post-verification success stage (consumes the draft downstream)
    Success,
}

/// Abstract page transition. The core only decides *when* a transition
/// happens; rendering and routing live outside.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, page: Page);
}

/// Navigator that only logs transitions, for headless use and defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate_to(&self, page: Page) {
        info!(?page, "navigating");
    }
}
