//! # Delivery History Sink
//!
//! Where successful deliveries are recorded. The append is best-effort:
//! the message already left through the channel, so a bookkeeping
//! failure is a data-quality issue, never a user-facing one.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use fedoc_core::{DeliveryRecord, DocumentId};

/// The history append failed.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The backing store rejected or lost the write.
    #[error("history append failed: {0}")]
    Failed(String),
}

/// Append-only recorder of completed deliveries.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Append one record for a document.
    async fn append(&self, id: DocumentId, record: DeliveryRecord) -> Result<(), HistoryError>;
}

/// In-memory sink for tests and tooling.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<(DocumentId, DeliveryRecord)>>,
}

impl InMemoryHistory {
    /// A snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<(DocumentId, DeliveryRecord)> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HistorySink for InMemoryHistory {
    async fn append(&self, id: DocumentId, record: DeliveryRecord) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .map_err(|e| HistoryError::Failed(e.to_string()))?
            .push((id, record));
        Ok(())
    }
}
