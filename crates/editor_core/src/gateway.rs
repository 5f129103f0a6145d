//! Persistence seam consumed by the editor.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use shared::domain::{CatchRecord, RecordId};

/// Asynchronous record store the controller depends on but does not own.
///
/// Calls may be slow; implementations must tolerate concurrent access, the
/// editor performs no locking around them.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn lookup(&self, id: RecordId) -> Result<Option<CatchRecord>>;
    async fn create(&self, record: CatchRecord) -> Result<()>;
    async fn update(&self, record: CatchRecord) -> Result<()>;
    async fn delete(&self, id: Option<RecordId>) -> Result<()>;
}

/// Gateway stub for wiring an editor before a real store is available.
pub struct MissingRecordGateway;

#[async_trait]
impl RecordGateway for MissingRecordGateway {
    async fn lookup(&self, id: RecordId) -> Result<Option<CatchRecord>> {
        Err(anyhow!("record store unavailable for id {}", id.0))
    }

    async fn create(&self, _record: CatchRecord) -> Result<()> {
        Err(anyhow!("record store unavailable"))
    }

    async fn update(&self, record: CatchRecord) -> Result<()> {
        Err(anyhow!(
            "record store unavailable for id {:?}",
            record.id.map(|id| id.0)
        ))
    }

    async fn delete(&self, id: Option<RecordId>) -> Result<()> {
        Err(anyhow!(
            "record store unavailable for id {:?}",
            id.map(|id| id.0)
        ))
    }
}
