use borsh::{BorshDeserialize, BorshSerialize};
use tokenbridge_primitives::{
    receipt::{ReceiptId, ReceiptRecord},
    Address, TimestampMs, U256,
};

use crate::define_table_with_seek_key_codec;

/// Stored form of [`ReceiptRecord`] without the fields already in its key.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub(crate) struct ReceiptEntry {
    instance_id: Option<[u8; 32]>,
    amount: [u8; 32],
    consumed_at: TimestampMs,
}

impl ReceiptEntry {
    pub(crate) fn into_record(self, key: (Address, ReceiptId)) -> ReceiptRecord {
        let (local_token, receipt_id) = key;
        ReceiptRecord {
            receipt_id,
            local_token,
            instance_id: self.instance_id.map(U256::from_be_bytes),
            amount: U256::from_be_bytes(self.amount),
            consumed_at: self.consumed_at,
        }
    }
}

impl From<&ReceiptRecord> for ReceiptEntry {
    fn from(rec: &ReceiptRecord) -> Self {
        Self {
            instance_id: rec.instance_id.map(|id| id.to_be_bytes::<32>()),
            amount: rec.amount.to_be_bytes::<32>(),
            consumed_at: rec.consumed_at,
        }
    }
}

/// Key of a receipt: local token first so receipts of one token are adjacent.
pub(crate) fn receipt_key(rec: &ReceiptRecord) -> (Address, ReceiptId) {
    (rec.local_token, rec.receipt_id.clone())
}

define_table_with_seek_key_codec!(
    /// Consumed foreign-chain receipts, append-only.
    (ReceiptSchema) (Address, ReceiptId) => ReceiptEntry
);
