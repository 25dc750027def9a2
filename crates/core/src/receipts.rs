//! Ledger of consumed foreign-chain receipts.

use std::{fmt, sync::Arc};

use tokenbridge_db_types::traits::ReceiptDatabase;
use tokenbridge_primitives::{
    receipt::{ReceiptId, ReceiptRecord},
    Address,
};

use crate::errors::BridgeResult;

/// Makes deposit processing idempotent: each receipt is consumed at most
/// once per local token.
pub struct ReceiptLedger {
    db: Arc<dyn ReceiptDatabase>,
}

impl fmt::Debug for ReceiptLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptLedger").finish_non_exhaustive()
    }
}

impl ReceiptLedger {
    pub fn new(db: Arc<impl ReceiptDatabase>) -> Self {
        Self { db }
    }

    /// Consumes the receipt. Returns `false`, changing nothing, if it was
    /// consumed before.
    pub fn try_consume(&self, record: ReceiptRecord) -> BridgeResult<bool> {
        Ok(self.db.try_consume_receipt(record)?)
    }

    pub fn is_consumed(&self, local_token: Address, receipt_id: &ReceiptId) -> BridgeResult<bool> {
        Ok(self.get(local_token, receipt_id)?.is_some())
    }

    pub fn get(
        &self,
        local_token: Address,
        receipt_id: &ReceiptId,
    ) -> BridgeResult<Option<ReceiptRecord>> {
        Ok(self.db.get_receipt(local_token, receipt_id)?)
    }
}
