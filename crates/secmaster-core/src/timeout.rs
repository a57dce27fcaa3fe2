//! Timeout wrapper for async collaborator calls.

use crate::{SecMasterError, SecMasterResult};
use std::future::Future;
use std::time::Duration;

/// Runs `fut` with an upper bound of `duration`.
///
/// `operation` names the call in the resulting [`SecMasterError::Timeout`].
pub async fn with_timeout<Fut, T>(duration: Duration, operation: &str, fut: Fut) -> SecMasterResult<T>
where
    Fut: Future<Output = SecMasterResult<T>>,
{
    tokio::time::timeout(duration, fut)
        .await
        .map_err(|_| SecMasterError::Timeout(format!("{} timed out after {:?}", operation, duration)))?
}
