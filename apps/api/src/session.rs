//! Session state: one rubric index and one criteria list, held for the
//! lifetime of the process.
//!
//! State lives behind an explicit store passed through [`crate::state::AppState`]
//! rather than ambient globals, so the populate/clear lifecycle stays
//! auditable. Populate happens only after a fully successful ingestion;
//! reset clears everything at once.

use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::retrieval::VectorIndex;

#[derive(Default)]
struct Session {
    index: Option<Arc<VectorIndex>>,
    criteria: Vec<String>,
}

/// What the form UI needs to render: readiness, the ordered criteria list
/// (control ids derive from position, not label text), and whether the
/// server already holds a credential.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub ready: bool,
    pub criteria: Vec<String>,
    pub chunk_count: usize,
    pub key_configured: bool,
}

/// Shared handle to the single session. Cheap to clone into handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a freshly built index and hands back a shared reference so
    /// the caller can keep using it without re-locking.
    pub fn set_index(&self, index: VectorIndex) -> Result<Arc<VectorIndex>> {
        let index = Arc::new(index);
        let mut session = self.write()?;
        session.index = Some(Arc::clone(&index));
        Ok(index)
    }

    pub fn set_criteria(&self, criteria: Vec<String>) -> Result<()> {
        let mut session = self.write()?;
        session.criteria = criteria;
        Ok(())
    }

    /// Clears the index and criteria list entirely, so the next upload runs
    /// ingestion again from scratch.
    pub fn clear(&self) -> Result<()> {
        let mut session = self.write()?;
        session.index = None;
        session.criteria.clear();
        Ok(())
    }

    pub fn index(&self) -> Result<Option<Arc<VectorIndex>>> {
        Ok(self.read()?.index.clone())
    }

    pub fn has_index(&self) -> Result<bool> {
        Ok(self.read()?.index.is_some())
    }

    pub fn view(&self, key_configured: bool) -> Result<SessionView> {
        let session = self.read()?;
        Ok(SessionView {
            // The score form may render only when both the index and the
            // criteria list are non-empty.
            ready: session.index.is_some() && !session.criteria.is_empty(),
            criteria: session.criteria.clone(),
            chunk_count: session.index.as_ref().map(|i| i.len()).unwrap_or(0),
            key_configured,
        })
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Session>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("session lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Session>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("session lock poisoned"))
    }
}
