use tokenbridge_db_types::{
    mapping_helpers::{check_mapping_insert, replaced_local_supply_key},
    traits::BridgeLedgerDatabase,
    types::{DepositCommit, MappingInsert, MappingRemoval, SupplyUpdate},
    DbResult,
};
use tokenbridge_primitives::{
    mapping::TokenMappingEntry, receipt::ReceiptRecord, standard::TokenStandard,
    supply::SupplyKey, Address, TimestampMs, U256,
};

use crate::{
    define_sled_database,
    mapping::schemas::{LocalTokenIndexSchema, MappingRecord, TokenMappingSchema},
    receipt::schemas::{receipt_key, ReceiptEntry, ReceiptSchema},
    supply::schemas::{apply_credit, read_balance, SupplySchema},
};

define_sled_database!(
    pub struct BridgeLedgerDBSled {
        mapping_tree: TokenMappingSchema,
        local_index_tree: LocalTokenIndexSchema,
        receipt_tree: ReceiptSchema,
        supply_tree: SupplySchema,
    }
);

impl BridgeLedgerDatabase for BridgeLedgerDBSled {
    fn put_mapping_checked(&self, entry: TokenMappingEntry) -> DbResult<MappingInsert> {
        let key = (entry.mapping.standard(), entry.mapping.foreign_token());
        let local = entry.mapping.local_token();
        let record = MappingRecord::from(&entry);

        self.config.with_retry(
            (&self.mapping_tree, &self.local_index_tree, &self.supply_tree),
            |(mt, lt, st)| {
                let existing = mt.get(&key)?.map(TokenMappingEntry::from);
                let replaced = match replaced_local_supply_key(existing.as_ref(), local) {
                    Some(prev) => read_balance(&st, &prev)?,
                    None => U256::ZERO,
                };
                let owner = lt.get(&local)?;

                let drop_index =
                    match check_mapping_insert(existing.as_ref(), owner, &entry, replaced) {
                        Ok(drop_index) => drop_index,
                        Err(rejected) => return Ok(rejected),
                    };

                if let Some(prev) = drop_index {
                    lt.remove(&prev)?;
                }
                lt.insert(&local, &key)?;
                mt.insert(&key, &record)?;
                Ok(MappingInsert::Inserted)
            },
        )
    }

    fn remove_mapping_if_supply(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
        expected_outstanding: U256,
        removed_at: TimestampMs,
    ) -> DbResult<MappingRemoval> {
        let key = (standard, foreign_token);

        self.config
            .with_retry((&self.mapping_tree, &self.supply_tree), |(mt, st)| {
                let Some(entry) = mt
                    .get(&key)?
                    .map(TokenMappingEntry::from)
                    .filter(TokenMappingEntry::is_active)
                else {
                    return Ok(MappingRemoval::NotFound);
                };
                let local_token = entry.mapping.local_token();

                let actual = read_balance(&st, &SupplyKey::aggregate(local_token))?;
                if actual != expected_outstanding {
                    return Ok(MappingRemoval::SupplyMismatch { actual });
                }

                let tombstone = entry.tombstoned(removed_at, actual);
                mt.insert(&key, &MappingRecord::from(&tombstone))?;
                Ok(MappingRemoval::Removed { local_token })
            })
    }

    fn commit_deposit(
        &self,
        record: ReceiptRecord,
        instance_cap: Option<U256>,
    ) -> DbResult<DepositCommit> {
        let rkey = receipt_key(&record);
        let entry = ReceiptEntry::from(&record);
        let skey = SupplyKey::new(record.local_token, record.instance_id);

        self.config
            .with_retry((&self.receipt_tree, &self.supply_tree), |(rt, st)| {
                if rt.contains_key(&rkey)? {
                    return Ok(DepositCommit::AlreadyConsumed);
                }

                match apply_credit(&st, &skey, record.amount, instance_cap)? {
                    SupplyUpdate::Applied { balance } => {
                        rt.insert(&rkey, &entry)?;
                        Ok(DepositCommit::Committed { balance })
                    }
                    rejected => Ok(DepositCommit::Rejected(rejected)),
                }
            })
    }
}

