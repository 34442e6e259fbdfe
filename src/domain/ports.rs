use crate::domain::model::{Artifact, DispatchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only activity trail. Implementations must write each record as one
/// atomic newline-terminated append and never read the file back.
pub trait ActivityLog: Send + Sync {
    fn record(&self, accion: &str) -> Result<()>;
}

/// Outbound delivery of the finished artifact. Transport faults never escape
/// this boundary; they come back as a failed outcome with a readable message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, artifact: &Artifact, unit: &str) -> DispatchOutcome;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
