//! Resend countdown arithmetic and the ticker task.

use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Ceiling for the displayed countdown (the mm:ss display range).
pub const REMAINING_CEILING_SECS: i64 = 3600;

/// Seconds left until resend becomes available:
/// `clamp(cooldown - floor(elapsed / 1000), 0, 3600)`. Never negative.
pub fn remaining_seconds(otp_sent_at_ms: i64, now_ms: i64, cooldown_secs: i64) -> i64 {
    let elapsed = (now_ms - otp_sent_at_ms).div_euclid(1000);
    (cooldown_secs - elapsed).clamp(0, REMAINING_CEILING_SECS)
}

/// `mm:ss` display form of a countdown value.
pub fn format_mm_ss(seconds: i64) -> String {
    let s = seconds.clamp(0, REMAINING_CEILING_SECS);
    format!("{:02}:{:02}", s / 60, s % 60)
}

pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Recurring countdown tick, owned by the verification session.
///
/// A spawned task recomputes the remaining seconds on every tick and
/// publishes the value on a watch channel, stopping itself once it reaches
/// zero. Dropping (or cancelling) the handle aborts the task, so a stale
/// ticker can never publish after the session has let go of it.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
    rx: watch::Receiver<i64>,
}

impl CountdownTicker {
    pub fn start(otp_sent_at_ms: i64, cooldown_secs: i64, tick: Duration) -> Self {
        let initial = remaining_seconds(otp_sent_at_ms, now_ms(), cooldown_secs);
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                let remaining = remaining_seconds(otp_sent_at_ms, now_ms(), cooldown_secs);
                if tx.send(remaining).is_err() {
                    break; // nobody is listening anymore
                }
                if remaining == 0 {
                    break;
                }
            }
        });

        Self { handle, rx }
    }

    /// Subscribe to published countdown values.
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.rx.clone()
    }

    /// Most recently published value.
    pub fn remaining(&self) -> i64 {
        *self.rx.borrow()
    }

    /// Stop the ticker task immediately.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
