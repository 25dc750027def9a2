//! In-memory backend for tests.
//!
//! Every table sits behind a single mutex, so each trait method is atomic
//! with respect to all others.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::Mutex;
use tokenbridge_primitives::{
    guardian::GuardianSet,
    mapping::TokenMappingEntry,
    receipt::{ReceiptId, ReceiptRecord},
    standard::TokenStandard,
    supply::SupplyKey,
    Address, TimestampMs, U256,
};

use crate::{
    mapping_helpers::{check_mapping_insert, replaced_local_supply_key},
    supply_helpers::{plan_credit, plan_debit, SupplyCounters},
    traits::*,
    types::*,
    DbError, DbResult,
};

#[derive(Debug, Default)]
struct StubTables {
    guardians: Option<GuardianSet>,
    mappings: BTreeMap<(TokenStandard, Address), TokenMappingEntry>,
    local_index: HashMap<Address, (TokenStandard, Address)>,
    receipts: HashMap<(Address, ReceiptId), ReceiptRecord>,
    supply: HashMap<SupplyKey, U256>,
}

impl StubTables {
    fn supply_of(&self, key: &SupplyKey) -> U256 {
        self.supply.get(key).copied().unwrap_or_default()
    }

    fn counters(&self, key: &SupplyKey) -> SupplyCounters {
        SupplyCounters {
            instance: (!key.is_aggregate()).then(|| self.supply_of(key)),
            aggregate: self.supply_of(&key.to_aggregate()),
        }
    }

    fn store_counters(&mut self, key: &SupplyKey, counters: SupplyCounters) {
        if let Some(bal) = counters.instance {
            self.supply.insert(*key, bal);
        }
        self.supply.insert(key.to_aggregate(), counters.aggregate);
    }

    fn credit(&mut self, key: &SupplyKey, amount: U256, cap: Option<U256>) -> SupplyUpdate {
        match plan_credit(self.counters(key), amount, cap) {
            Ok(next) => {
                self.store_counters(key, next);
                SupplyUpdate::Applied {
                    balance: next.addressed(),
                }
            }
            Err(rejected) => rejected,
        }
    }
}

#[derive(Debug, Default)]
pub struct StubBridgeDb {
    tables: Mutex<StubTables>,
}

impl StubBridgeDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuardianDatabase for StubBridgeDb {
    fn init_guardian_set(&self, set: GuardianSet) -> DbResult<()> {
        let mut tbl = self.tables.lock();
        if tbl.guardians.is_some() {
            return Err(DbError::EntryAlreadyExists);
        }
        tbl.guardians = Some(set);
        Ok(())
    }

    fn get_guardian_set(&self) -> DbResult<Option<GuardianSet>> {
        Ok(self.tables.lock().guardians.clone())
    }

    fn add_guardian(&self, guardian: Address) -> DbResult<bool> {
        let mut tbl = self.tables.lock();
        let set = tbl.guardians.as_mut().ok_or(DbError::NotBootstrapped)?;
        Ok(set.insert(guardian))
    }

    fn remove_guardian(&self, guardian: Address) -> DbResult<GuardianRemoval> {
        let mut tbl = self.tables.lock();
        let set = tbl.guardians.as_mut().ok_or(DbError::NotBootstrapped)?;
        if !set.contains(&guardian) {
            return Ok(GuardianRemoval::NotMember);
        }
        if set.len() == 1 {
            return Ok(GuardianRemoval::LastMember);
        }
        set.remove(&guardian);
        Ok(GuardianRemoval::Removed)
    }
}

impl TokenMappingDatabase for StubBridgeDb {
    fn get_mapping(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> DbResult<Option<TokenMappingEntry>> {
        Ok(self
            .tables
            .lock()
            .mappings
            .get(&(standard, foreign_token))
            .cloned())
    }

    fn get_mapping_key_by_local(
        &self,
        local_token: Address,
    ) -> DbResult<Option<(TokenStandard, Address)>> {
        Ok(self.tables.lock().local_index.get(&local_token).copied())
    }

    fn get_all_mappings(&self) -> DbResult<Vec<TokenMappingEntry>> {
        Ok(self.tables.lock().mappings.values().cloned().collect())
    }
}

impl ReceiptDatabase for StubBridgeDb {
    fn try_consume_receipt(&self, record: ReceiptRecord) -> DbResult<bool> {
        let mut tbl = self.tables.lock();
        let key = (record.local_token, record.receipt_id.clone());
        if tbl.receipts.contains_key(&key) {
            return Ok(false);
        }
        tbl.receipts.insert(key, record);
        Ok(true)
    }

    fn get_receipt(
        &self,
        local_token: Address,
        receipt_id: &ReceiptId,
    ) -> DbResult<Option<ReceiptRecord>> {
        Ok(self
            .tables
            .lock()
            .receipts
            .get(&(local_token, receipt_id.clone()))
            .cloned())
    }
}

impl SupplyDatabase for StubBridgeDb {
    fn get_supply(&self, key: SupplyKey) -> DbResult<U256> {
        Ok(self.tables.lock().supply_of(&key))
    }

    fn credit_supply(
        &self,
        key: SupplyKey,
        amount: U256,
        instance_cap: Option<U256>,
    ) -> DbResult<SupplyUpdate> {
        Ok(self.tables.lock().credit(&key, amount, instance_cap))
    }

    fn debit_supply(&self, key: SupplyKey, amount: U256) -> DbResult<SupplyUpdate> {
        let mut tbl = self.tables.lock();
        match plan_debit(tbl.counters(&key), amount) {
            Ok(next) => {
                tbl.store_counters(&key, next);
                Ok(SupplyUpdate::Applied {
                    balance: next.addressed(),
                })
            }
            Err(rejected) => Ok(rejected),
        }
    }
}

impl BridgeLedgerDatabase for StubBridgeDb {
    fn put_mapping_checked(&self, entry: TokenMappingEntry) -> DbResult<MappingInsert> {
        let mut tbl = self.tables.lock();
        let key = (entry.mapping.standard(), entry.mapping.foreign_token());
        let local = entry.mapping.local_token();

        let existing = tbl.mappings.get(&key);
        let replaced = replaced_local_supply_key(existing, local)
            .map(|k| tbl.supply_of(&k))
            .unwrap_or_default();
        let owner = tbl.local_index.get(&local).copied();

        let drop_index = match check_mapping_insert(existing, owner, &entry, replaced) {
            Ok(drop_index) => drop_index,
            Err(rejected) => return Ok(rejected),
        };

        if let Some(prev) = drop_index {
            tbl.local_index.remove(&prev);
        }
        tbl.local_index.insert(local, key);
        tbl.mappings.insert(key, entry);
        Ok(MappingInsert::Inserted)
    }

    fn remove_mapping_if_supply(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
        expected_outstanding: U256,
        removed_at: TimestampMs,
    ) -> DbResult<MappingRemoval> {
        let mut tbl = self.tables.lock();
        let key = (standard, foreign_token);

        let Some(entry) = tbl.mappings.get(&key).filter(|e| e.is_active()) else {
            return Ok(MappingRemoval::NotFound);
        };
        let local_token = entry.mapping.local_token();

        let actual = tbl.supply_of(&SupplyKey::aggregate(local_token));
        if actual != expected_outstanding {
            return Ok(MappingRemoval::SupplyMismatch { actual });
        }

        let tombstone = entry.tombstoned(removed_at, actual);
        tbl.mappings.insert(key, tombstone);
        Ok(MappingRemoval::Removed { local_token })
    }

    fn commit_deposit(
        &self,
        record: ReceiptRecord,
        instance_cap: Option<U256>,
    ) -> DbResult<DepositCommit> {
        let mut tbl = self.tables.lock();
        let receipt_key = (record.local_token, record.receipt_id.clone());
        if tbl.receipts.contains_key(&receipt_key) {
            return Ok(DepositCommit::AlreadyConsumed);
        }

        let supply_key = SupplyKey::new(record.local_token, record.instance_id);
        match tbl.credit(&supply_key, record.amount, instance_cap) {
            SupplyUpdate::Applied { balance } => {
                tbl.receipts.insert(receipt_key, record);
                Ok(DepositCommit::Committed { balance })
            }
            rejected => Ok(DepositCommit::Rejected(rejected)),
        }
    }
}

/// [`DatabaseBackend`] handing out the same [`StubBridgeDb`] for every
/// table group.
#[derive(Debug, Default)]
pub struct StubBackend {
    db: Arc<StubBridgeDb>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatabaseBackend for StubBackend {
    fn guardian_db(&self) -> Arc<impl GuardianDatabase> {
        self.db.clone()
    }

    fn mapping_db(&self) -> Arc<impl TokenMappingDatabase> {
        self.db.clone()
    }

    fn receipt_db(&self) -> Arc<impl ReceiptDatabase> {
        self.db.clone()
    }

    fn supply_db(&self) -> Arc<impl SupplyDatabase> {
        self.db.clone()
    }

    fn ledger_db(&self) -> Arc<impl BridgeLedgerDatabase> {
        self.db.clone()
    }
}
