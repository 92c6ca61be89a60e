use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::MatchRecord;

/// Errors that can occur when handing match records downstream
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Persistence failed: {0}")]
    Persist(String),

    #[error("Notification failed for match {match_id}: {reason}")]
    Notify { match_id: Uuid, reason: String },
}

/// Destination for batch match records
///
/// `persist` stores the whole batch; `notify` fires the per-match side
/// effect (e-mail, in-app alert) after persistence succeeded.
pub trait MatchSink: Send + Sync {
    fn persist(&self, records: &[MatchRecord]) -> Result<(), SinkError>;

    fn notify(&self, record: &MatchRecord) -> Result<(), SinkError>;
}

/// Persist every record, then notify each one
///
/// A persistence failure aborts. Notification is best-effort: failures are
/// logged and the number of successful notifications returned.
pub fn deliver(sink: &dyn MatchSink, records: &[MatchRecord]) -> Result<usize, SinkError> {
    if records.is_empty() {
        return Ok(0);
    }

    sink.persist(records)?;

    let mut notified = 0;
    for record in records {
        match sink.notify(record) {
            Ok(()) => notified += 1,
            Err(e) => tracing::warn!("Match {} persisted but notification failed: {}", record.match_id, e),
        }
    }

    Ok(notified)
}

/// Sink that emits each record as a structured log event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MatchSink for TracingSink {
    fn persist(&self, records: &[MatchRecord]) -> Result<(), SinkError> {
        for record in records {
            tracing::info!(
                match_id = %record.match_id,
                candidate_id = %record.candidate_id,
                role_id = %record.role_id,
                score = record.score,
                category = ?record.category,
                "Match recorded"
            );
        }
        Ok(())
    }

    fn notify(&self, record: &MatchRecord) -> Result<(), SinkError> {
        tracing::debug!(match_id = %record.match_id, candidate_id = %record.candidate_id, "Match notification queued");
        Ok(())
    }
}

/// In-memory sink, optionally failing on demand
#[derive(Debug, Default)]
pub struct MemorySink {
    persisted: Mutex<Vec<MatchRecord>>,
    notified: Mutex<Vec<Uuid>>,
    fail_persist: bool,
    fail_notify: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_persist() -> Self {
        Self {
            fail_persist: true,
            ..Self::default()
        }
    }

    pub fn failing_notify() -> Self {
        Self {
            fail_notify: true,
            ..Self::default()
        }
    }

    pub fn persisted(&self) -> Vec<MatchRecord> {
        self.persisted.lock().map(|records| records.clone()).unwrap_or_default()
    }

    pub fn notified(&self) -> Vec<Uuid> {
        self.notified.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

impl MatchSink for MemorySink {
    fn persist(&self, records: &[MatchRecord]) -> Result<(), SinkError> {
        if self.fail_persist {
            return Err(SinkError::Persist("memory sink configured to fail".to_string()));
        }
        self.persisted
            .lock()
            .map_err(|e| SinkError::Persist(e.to_string()))?
            .extend_from_slice(records);
        Ok(())
    }

    fn notify(&self, record: &MatchRecord) -> Result<(), SinkError> {
        if self.fail_notify {
            return Err(SinkError::Notify {
                match_id: record.match_id,
                reason: "memory sink configured to fail".to_string(),
            });
        }
        self.notified
            .lock()
            .map_err(|e| SinkError::Notify {
                match_id: record.match_id,
                reason: e.to_string(),
            })?
            .push(record.match_id);
        Ok(())
    }
}
