//! In-memory session store.

use super::Theme;
use crate::draft::Draft;
use crate::error::OnboardingError;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Memory-only backend: a single mutable draft slot plus the display
/// preference. Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<Draft>>,
    theme: RwLock<Option<Theme>>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Result<Option<Draft>, OnboardingError> {
        Ok(self.slot.read().await.clone())
    }

    pub async fn set(&self, draft: &Draft) -> Result<(), OnboardingError> {
        *self.slot.write().await = Some(draft.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(verification_id = %draft.verification_id, "draft stored in memory");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), OnboardingError> {
        let removed = self.slot.write().await.take().is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::Relaxed);
            debug!("draft slot cleared");
        }
        Ok(())
    }

    pub async fn get_theme(&self) -> Result<Option<Theme>, OnboardingError> {
        Ok(*self.theme.read().await)
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), OnboardingError> {
        *self.theme.write().await = Some(theme);
        Ok(())
    }

    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Role;
    use chrono::Utc;

    #[tokio::test]
    async fn test_read_your_writes() {
        let store = MemoryStore::new();
        assert!(store.get().await.unwrap().is_none());
        assert_eq!(store.write_count(), 0);

        let draft = Draft::new(
            "Sara Ali".into(),
            "0512345678".into(),
            "+966512345678".into(),
            "sara@example.com".into(),
            Role::Customer,
            Utc::now(),
        );
        store.set(&draft).await.unwrap();

        assert_eq!(store.get().await.unwrap(), Some(draft));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_of_empty_slot_counts_no_write() {
        let store = MemoryStore::new();
        store.clear().await.unwrap();
        assert_eq!(store.write_count(), 0);
    }
}
