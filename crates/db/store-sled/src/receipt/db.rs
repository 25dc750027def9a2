use tokenbridge_db_types::{traits::ReceiptDatabase, DbResult};
use tokenbridge_primitives::{
    receipt::{ReceiptId, ReceiptRecord},
    Address,
};

use super::schemas::{receipt_key, ReceiptEntry, ReceiptSchema};
use crate::define_sled_database;

define_sled_database!(
    pub struct ReceiptDBSled {
        receipt_tree: ReceiptSchema,
    }
);

impl ReceiptDatabase for ReceiptDBSled {
    fn try_consume_receipt(&self, record: ReceiptRecord) -> DbResult<bool> {
        let key = receipt_key(&record);
        let entry = ReceiptEntry::from(&record);

        self.config.with_retry((&self.receipt_tree,), |(rt,)| {
            if rt.contains_key(&key)? {
                return Ok(false);
            }
            rt.insert(&key, &entry)?;
            Ok(true)
        })
    }

    fn get_receipt(
        &self,
        local_token: Address,
        receipt_id: &ReceiptId,
    ) -> DbResult<Option<ReceiptRecord>> {
        let key = (local_token, receipt_id.clone());
        Ok(self
            .receipt_tree
            .get(&key)?
            .map(|entry| entry.into_record(key)))
    }
}
