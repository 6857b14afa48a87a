use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use shared::domain::{MotionSample, SessionEntry, SessionId};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("missing session")]
    InvalidSession,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReceipt {
    pub sequence: u64,
    pub arrived_at_ms: i64,
}

/// One session's state. `None` until the first ingest has been applied.
type Slot = Arc<Mutex<Option<SessionEntry>>>;

/// Latest-sample-wins store keyed by session.
///
/// The table lock only guards slot lookup and creation; every read or write
/// of an entry happens under that session's own slot lock, so sessions never
/// wait on each other's updates and a single session's sample, sequence and
/// timestamp always change together.
#[derive(Clone)]
pub struct SessionStore {
    slots: Arc<RwLock<HashMap<SessionId, Slot>>>,
    clock: fn() -> i64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock_ms)
    }

    /// `clock` returns the current Unix time in milliseconds.
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    pub async fn ingest(
        &self,
        session: &str,
        sample: Option<MotionSample>,
    ) -> Result<IngestReceipt> {
        let session = SessionId::parse(session).ok_or(StoreError::InvalidSession)?;
        let slot = self.slot_or_insert(&session).await;

        let mut guard = slot.lock().await;
        let arrived_at_ms = (self.clock)();
        let sequence = guard.as_ref().map_or(0, |entry| entry.sequence) + 1;
        if sequence == 1 {
            info!(%session, "first sample for session");
        }
        debug!(%session, sequence, "ingested motion sample");

        *guard = Some(SessionEntry {
            session,
            arrived_at_ms,
            sequence,
            sample,
        });

        Ok(IngestReceipt {
            sequence,
            arrived_at_ms,
        })
    }

    pub async fn fetch(&self, session: &str) -> Result<Option<SessionEntry>> {
        let session = SessionId::parse(session).ok_or(StoreError::InvalidSession)?;
        let slot = {
            let slots = self.slots.read().await;
            slots.get(&session).cloned()
        };
        let Some(slot) = slot else {
            return Ok(None);
        };

        let entry = slot.lock().await.clone();
        Ok(entry)
    }

    pub async fn session_count(&self) -> usize {
        self.slots.read().await.len()
    }

    async fn slot_or_insert(&self, session: &SessionId) -> Slot {
        if let Some(slot) = self.slots.read().await.get(session) {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().await;
        Arc::clone(slots.entry(session.clone()).or_default())
    }
}

fn system_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
