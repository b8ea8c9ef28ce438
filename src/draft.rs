//! The pending registration draft.

use crate::validate::Role;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// The single pending registration record awaiting code confirmation.
///
/// Field names are serialized in camelCase to match the persisted session
/// layout. A draft is only built from input that passed every form check;
/// see [`crate::registration::RegistrationController::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Display name, 2-200 chars after trimming
    pub full_name: String,

    /// Original phone input, retained for re-display only
    pub phone_raw: String,

    /// Canonical `+9665XXXXXXXX` identifier the code is delivered to
    pub phone_e164: String,

    /// Normalized (trimmed, lower-cased) email, or empty
    pub email: String,

    /// Selected account type
    pub role: Role,

    /// Always true for a constructible draft
    pub terms_accepted: bool,

    /// When the draft was created
    pub created_at: DateTime<Utc>,

    /// Opaque id minted at creation, unique per draft
    pub verification_id: String,

    /// Start of the current code validity/countdown window, ms since epoch.
    /// Monotonically non-decreasing across resends.
    pub otp_sent_at_ms: i64,

    #[serde(default)]
    pub verified: bool,

    /// Set exactly once, on successful verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Draft {
    /// Build a fresh draft from validated fields. The countdown window
    /// starts immediately.
    pub fn new(
        full_name: String,
        phone_raw: String,
        phone_e164: String,
        email: String,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            full_name,
            phone_raw,
            phone_e164,
            email,
            role,
            terms_accepted: true,
            created_at: now,
            verification_id: mint_verification_id(),
            otp_sent_at_ms: now.timestamp_millis(),
            verified: false,
            verified_at: None,
        }
    }

    /// Mark the draft verified. Returns false (and changes nothing) if it
    /// already was: the flag transitions false -> true exactly once.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) -> bool {
        if self.verified {
            return false;
        }
        self.verified = true;
        self.verified_at = Some(now);
        true
    }

    /// Restart the countdown window. `otp_sent_at_ms` never moves backwards.
    pub fn touch_otp_sent(&mut self, now_ms: i64) {
        self.otp_sent_at_ms = self.otp_sent_at_ms.max(now_ms);
    }

    /// Structural validation applied to records read back from storage.
    /// A stored draft failing this is treated as absent.
    pub fn is_sane(&self) -> bool {
        let name_len = self.full_name.trim().chars().count();
        self.phone_e164.starts_with("+9665")
            && self.phone_e164.len() == 13
            && self.phone_e164[1..].chars().all(|c| c.is_ascii_digit())
            && (2..=200).contains(&name_len)
    }
}

/// Mint an opaque verification id: `ver_` plus 12 random hex chars.
pub fn mint_verification_id() -> String {
    let mut bytes = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("ver_{}", hex::encode(bytes))
}
