//! Single-slot persistence for the registration draft.
//!
//! The store holds at most one pending draft at a time under a well-known
//! session key, plus an independent display preference. Both backends give
//! read-your-writes within the session; the file backend writes atomically
//! and treats corrupt state as absent rather than failing the session.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::draft::Draft;
use crate::error::OnboardingError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Well-known key of the pending registration draft.
pub const REG_KEY: &str = "wasla_reg";

/// Well-known key of the display preference, stored alongside the draft
/// but unrelated to it.
pub const THEME_KEY: &str = "wasla_theme";

/// Persisted display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Storage backend for the session.
pub enum DraftStore {
    /// JSON file on disk
    File(FileStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl DraftStore {
    /// File-backed store at the given path.
    pub fn file(path: PathBuf) -> Self {
        DraftStore::File(FileStore::new(path))
    }

    /// Memory-only store.
    pub fn memory() -> Self {
        DraftStore::Memory(MemoryStore::new())
    }

    /// Read the pending draft, if any.
    pub async fn get(&self) -> Result<Option<Draft>, OnboardingError> {
        match self {
            DraftStore::File(s) => s.get().await,
            DraftStore::Memory(s) => s.get().await,
        }
    }

    /// Write the draft, unconditionally replacing any prior one.
    pub async fn set(&self, draft: &Draft) -> Result<(), OnboardingError> {
        match self {
            DraftStore::File(s) => s.set(draft).await,
            DraftStore::Memory(s) => s.set(draft).await,
        }
    }

    /// Remove the pending draft.
    pub async fn clear(&self) -> Result<(), OnboardingError> {
        match self {
            DraftStore::File(s) => s.clear().await,
            DraftStore::Memory(s) => s.clear().await,
        }
    }

    pub async fn get_theme(&self) -> Result<Option<Theme>, OnboardingError> {
        match self {
            DraftStore::File(s) => s.get_theme().await,
            DraftStore::Memory(s) => s.get_theme().await,
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), OnboardingError> {
        match self {
            DraftStore::File(s) => s.set_theme(theme).await,
            DraftStore::Memory(s) => s.set_theme(theme).await,
        }
    }

    /// Number of draft writes (set + clear) performed through this store.
    pub fn write_count(&self) -> u64 {
        match self {
            DraftStore::File(s) => s.write_count(),
            DraftStore::Memory(s) => s.write_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Role;
    use chrono::Utc;

    fn sample_draft() -> Draft {
        Draft::new(
            "Sara Ali".into(),
            "0512345678".into(),
            "+966512345678".into(),
            "".into(),
            Role::Provider,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_single_slot_overwrite() {
        let store = DraftStore::memory();
        assert!(store.get().await.unwrap().is_none());

        let first = sample_draft();
        store.set(&first).await.unwrap();

        let mut second = sample_draft();
        second.full_name = "Nora Saleh".into();
        store.set(&second).await.unwrap();

        // Only the newest draft survives.
        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Nora Saleh");
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = DraftStore::memory();
        store.set(&sample_draft()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_theme_independent_of_draft() {
        let store = DraftStore::memory();
        store.set_theme(Theme::Dark).await.unwrap();
        store.set(&sample_draft()).await.unwrap();
        store.clear().await.unwrap();

        // Clearing the draft never touches the preference key.
        assert_eq!(store.get_theme().await.unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"light\"").unwrap(),
            Theme::Light
        );
    }
}
