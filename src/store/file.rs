//! File-backed session store.

use super::{Theme, REG_KEY, THEME_KEY};
use crate::draft::Draft;
use crate::error::OnboardingError;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, warn};

/// Durable backend: one JSON object file holding the session keys.
///
/// A missing or unreadable file, or a structurally invalid stored draft,
/// reads back as absent. The flow then restarts at registration instead of
/// crashing on stale state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    writes: AtomicU64,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            writes: AtomicU64::new(0),
        }
    }

    /// Read the session file as a JSON object, tolerating every failure
    /// mode by falling back to an empty object.
    async fn read_session(&self) -> Map<String, Value> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "session file unreadable, treating as empty");
                return Map::new();
            }
        };

        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(path = ?self.path, "session file is not a JSON object, treating as empty");
                Map::new()
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "session file corrupt, treating as empty");
                Map::new()
            }
        }
    }

    /// Write the whole session object atomically (temp file + rename).
    async fn write_session(&self, session: &Map<String, Value>) -> Result<(), OnboardingError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(&Value::Object(session.clone()))?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = ?self.path, bytes = data.len(), "session file written");
        Ok(())
    }

    pub async fn get(&self) -> Result<Option<Draft>, OnboardingError> {
        let session = self.read_session().await;
        let Some(value) = session.get(REG_KEY) else {
            return Ok(None);
        };

        match serde_json::from_value::<Draft>(value.clone()) {
            Ok(draft) if draft.is_sane() => Ok(Some(draft)),
            Ok(_) => {
                warn!("stored draft is structurally invalid, treating as absent");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "stored draft does not parse, treating as absent");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, draft: &Draft) -> Result<(), OnboardingError> {
        let mut session = self.read_session().await;
        session.insert(REG_KEY.into(), serde_json::to_value(draft)?);
        self.write_session(&session).await?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(verification_id = %draft.verification_id, "draft persisted");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), OnboardingError> {
        let mut session = self.read_session().await;
        if session.remove(REG_KEY).is_some() {
            self.write_session(&session).await?;
            self.writes.fetch_add(1, Ordering::Relaxed);
            debug!("draft removed from session file");
        }
        Ok(())
    }

    pub async fn get_theme(&self) -> Result<Option<Theme>, OnboardingError> {
        let session = self.read_session().await;
        Ok(session
            .get(THEME_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok()))
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), OnboardingError> {
        let mut session = self.read_session().await;
        session.insert(THEME_KEY.into(), serde_json::to_value(theme)?);
        self.write_session(&session).await
    }

    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}
