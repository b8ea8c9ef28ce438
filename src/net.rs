//! Mocked network collaborator.

use std::time::Duration;

/// Opaque asynchronous "request" that always succeeds after the given
/// delay. Stands in for the real backend round trip; a production build
/// would bound it and fail on timeout.
pub async fn simulate_network(delay_ms: u64) {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}
