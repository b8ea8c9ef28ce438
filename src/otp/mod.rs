//! OTP verification session state machine.

pub mod countdown;
pub mod entry;

pub use countdown::{format_mm_ss, remaining_seconds, CountdownTicker};
pub use entry::{CodeEntry, CODE_LEN};

use crate::config::{Config, NetworkConfig, OtpConfig};
use crate::draft::Draft;
use crate::error::OnboardingError;
use crate::nav::{Navigator, Page};
use crate::net::simulate_network;
use crate::phone::mask_phone;
use crate::store::DraftStore;
use crate::validate::{self, Field, FieldError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Observable session state. `Cooling` is `AwaitingCode` while the resend
/// window is still counting down. The no-draft case is terminal and has no
/// session value: [`OtpSession::open`] fails with
/// [`OnboardingError::NoDraft`] after redirecting to registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    AwaitingCode,
    Cooling,
    Verified,
}

/// Result of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the draft is now verified
    Accepted,
    /// Well-formed code, wrong value; the form stays usable
    Rejected,
    /// Not exactly six digits; checked before any simulated delay
    MalformedCode,
}

impl VerifyOutcome {
    /// Field-level message for the code input, if the outcome carries one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            VerifyOutcome::Accepted => None,
            VerifyOutcome::Rejected => Some(validate::MSG_OTP_REJECTED),
            VerifyOutcome::MalformedCode => Some(validate::MSG_OTP_MALFORMED),
        }
    }

    /// The same message surfaced as an error on the code field, matching
    /// how the form fields report their failures.
    pub fn field_error(&self) -> Option<FieldError> {
        self.message().map(|message| FieldError {
            field: Field::Otp,
            message,
        })
    }
}

/// Result of a resend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    /// Countdown window restarted
    Sent,
    /// Not eligible (still cooling, or already verified); nothing changed
    Cooling,
}

/// One user's verification session over the pending draft.
///
/// Owns the code entry state and the countdown ticker; both die with the
/// session, so a stale tick can never mutate anything afterwards.
pub struct OtpSession {
    store: Arc<DraftStore>,
    navigator: Arc<dyn Navigator>,
    otp: OtpConfig,
    network: NetworkConfig,
    draft: Draft,
    entry: CodeEntry,
    ticker: Option<CountdownTicker>,
}

impl OtpSession {
    /// Load the pending draft and open a session over it.
    ///
    /// With no usable draft (missing, corrupt, or unreadable store) the
    /// flow is redirected back to registration and the session does not
    /// come into existence.
    pub async fn open(
        store: Arc<DraftStore>,
        navigator: Arc<dyn Navigator>,
        config: &Config,
    ) -> Result<Self, OnboardingError> {
        let draft = match store.get().await {
            Ok(Some(draft)) => draft,
            Ok(None) => {
                warn!("no pending draft, returning to registration");
                navigator.navigate_to(Page::Register);
                return Err(OnboardingError::NoDraft);
            }
            Err(e) => {
                warn!(error = %e, "draft could not be loaded, returning to registration");
                navigator.navigate_to(Page::Register);
                return Err(OnboardingError::NoDraft);
            }
        };

        info!(
            verification_id = %draft.verification_id,
            phone = %draft.phone_e164,
            "verification session opened"
        );
        Ok(Self {
            store,
            navigator,
            otp: config.otp.clone(),
            network: config.network.clone(),
            draft,
            entry: CodeEntry::new(),
            ticker: None,
        })
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn state(&self, now_ms: i64) -> OtpState {
        if self.draft.verified {
            OtpState::Verified
        } else if self.remaining_seconds(now_ms) > 0 {
            OtpState::Cooling
        } else {
            OtpState::AwaitingCode
        }
    }

    /// Seconds left in the current countdown window.
    pub fn remaining_seconds(&self, now_ms: i64) -> i64 {
        countdown::remaining_seconds(
            self.draft.otp_sent_at_ms,
            now_ms,
            self.otp.resend_cooldown_secs,
        )
    }

    pub fn can_resend(&self, now_ms: i64) -> bool {
        !self.draft.verified && self.remaining_seconds(now_ms) == 0
    }

    /// Display form of the number the code was sent to.
    pub fn masked_phone(&self) -> String {
        mask_phone(&self.draft.phone_e164)
    }

    /// Start (or restart) the countdown ticker for the current window and
    /// return a receiver of its published values. Any previous ticker is
    /// cancelled first, so at most one runs per session.
    pub fn start_countdown(&mut self) -> watch::Receiver<i64> {
        self.stop_countdown();
        let ticker = CountdownTicker::start(
            self.draft.otp_sent_at_ms,
            self.otp.resend_cooldown_secs,
            Duration::from_millis(self.otp.tick_interval_ms),
        );
        let rx = ticker.subscribe();
        self.ticker = Some(ticker);
        rx
    }

    /// Cancel the running ticker, if any. Also happens implicitly when the
    /// session is dropped.
    pub fn stop_countdown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    pub fn current_entered_code(&self) -> String {
        self.entry.value()
    }

    pub fn set_entered_code(&mut self, code: &str) {
        self.entry.set_code(code);
    }

    /// Digit-level access for widgets driving the multi-box affordance.
    pub fn entry_mut(&mut self) -> &mut CodeEntry {
        &mut self.entry
    }

    /// Request a fresh code.
    ///
    /// A no-op unless [`can_resend`](Self::can_resend) holds: while the
    /// countdown is still running, and on a verified (terminal) session,
    /// nothing changes. Otherwise the window restarts (`otp_sent_at_ms`
    /// never moves backwards), the updated draft is persisted before the
    /// session adopts it, the entered code is discarded and a running
    /// ticker starts over.
    pub async fn resend(&mut self, now: DateTime<Utc>) -> Result<ResendOutcome, OnboardingError> {
        let now_ms = now.timestamp_millis();
        if !self.can_resend(now_ms) {
            return Ok(ResendOutcome::Cooling);
        }

        let mut updated = self.draft.clone();
        updated.touch_otp_sent(now_ms);
        self.store.set(&updated).await?;
        self.draft = updated;

        self.entry.clear();
        if self.ticker.is_some() {
            self.start_countdown();
        }

        info!(verification_id = %self.draft.verification_id, "verification code resent");
        Ok(ResendOutcome::Sent)
    }

    /// Check the entered code.
    ///
    /// Anything but exactly six digits is malformed and short-circuits
    /// before the simulated round trip. A wrong six-digit code is rejected
    /// without mutating anything. The matching code flips the draft to
    /// verified (exactly once), persists it and moves on to the success
    /// page.
    pub async fn verify(&mut self, now: DateTime<Utc>) -> Result<VerifyOutcome, OnboardingError> {
        let code = self.entry.value();
        if code.len() != CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Ok(VerifyOutcome::MalformedCode);
        }

        simulate_network(self.network.verify_delay_ms).await;

        // Demo-only comparison against the fixed configured code. A real
        // deployment verifies against a server-issued code bound to the
        // draft's verification_id, with expiry and an attempt cap.
        if code != self.otp.demo_code {
            warn!(verification_id = %self.draft.verification_id, "verification code rejected");
            return Ok(VerifyOutcome::Rejected);
        }

        let mut updated = self.draft.clone();
        if updated.mark_verified(now) {
            self.store.set(&updated).await?;
            self.draft = updated;
        }
        self.stop_countdown();

        info!(verification_id = %self.draft.verification_id, "phone number verified");
        self.navigator.navigate_to(Page::Success);
        Ok(VerifyOutcome::Accepted)
    }
}
