use std::sync::Arc;

use sled::transaction::ConflictableTransactionResult;
use tokenbridge_db_types::DbResult;
use typed_sled::{
    error::Error,
    transaction::{Backoff, ConstantBackoff, SledTransactional},
};

use crate::utils::to_db_error;

pub(crate) const DEFAULT_RETRY_COUNT: u16 = 3;
pub(crate) const DEFAULT_RETRY_DELAY_MS: u64 = 150;
pub(crate) const TEST_RETRY_DELAY_MS: u64 = 50;

/// Retry policy of the bridge's sled transactions.
///
/// Deposits for different instances of one token lock different keys in
/// the controller but write the same aggregate supply row, and a mapping
/// removal reads that row too. Sled reports such overlaps as conflicts, so
/// the losing transaction is rerun after `backoff` instead of surfacing an
/// error to the event source.
#[derive(Debug, Clone)]
pub struct SledDbConfig {
    pub retry_count: u16,
    pub backoff: Arc<dyn Backoff>,
}

impl SledDbConfig {
    pub fn new(retry_count: u16, backoff: Arc<dyn Backoff>) -> Self {
        Self {
            retry_count,
            backoff,
        }
    }

    /// Retries with a fixed `delay_ms` pause between attempts. Conflicts only
    /// come from other writers in this process, so a short constant pause
    /// is enough.
    pub fn new_with_constant_backoff(retry_count: u16, delay_ms: u64) -> Self {
        Self::new(retry_count, Arc::new(ConstantBackoff::new(delay_ms)))
    }

    pub fn production() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY_MS)
    }

    /// Shorter delays for tests.
    pub fn test() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, TEST_RETRY_DELAY_MS)
    }

    /// Runs `f` as one transaction over `trees`.
    ///
    /// Rejections such as a replayed receipt are returned by `f` through `R`
    /// before anything is written. `f` is rerun on conflict and must only
    /// touch the transaction views.
    pub fn with_retry<Trees, F, R>(&self, trees: Trees, f: F) -> DbResult<R>
    where
        Trees: SledTransactional,
        F: Fn(Trees::View) -> ConflictableTransactionResult<R, Error>,
    {
        trees
            .transaction_with_retry(self.backoff.as_ref(), self.retry_count.into(), f)
            .map_err(to_db_error)
    }
}

impl Default for SledDbConfig {
    fn default() -> Self {
        Self::production()
    }
}
