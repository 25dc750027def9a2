//! Trait definitions for low level database interfaces.
//!
//! Operations are NOT VALIDATED at this level beyond what is needed to keep
//! them atomic. Authorization and request validation live in the registries
//! of the bridge core.

use std::sync::Arc;

use tokenbridge_primitives::{
    guardian::GuardianSet,
    mapping::TokenMappingEntry,
    receipt::{ReceiptId, ReceiptRecord},
    standard::TokenStandard,
    supply::SupplyKey,
    Address, TimestampMs, U256,
};

use crate::{
    types::{DepositCommit, GuardianRemoval, MappingInsert, MappingRemoval, SupplyUpdate},
    DbResult,
};

/// Common database backend interface that registries can be built from
/// without naming every individual database type.
pub trait DatabaseBackend: Send + Sync {
    fn guardian_db(&self) -> Arc<impl GuardianDatabase>;
    fn mapping_db(&self) -> Arc<impl TokenMappingDatabase>;
    fn receipt_db(&self) -> Arc<impl ReceiptDatabase>;
    fn supply_db(&self) -> Arc<impl SupplyDatabase>;
    fn ledger_db(&self) -> Arc<impl BridgeLedgerDatabase>;
}

/// Database interface for the guardian set.
pub trait GuardianDatabase: Send + Sync + 'static {
    /// Writes the initial guardian set.
    /// Returns [`DbError::EntryAlreadyExists`](crate::DbError) if one is present.
    fn init_guardian_set(&self, set: GuardianSet) -> DbResult<()>;

    /// Gets the guardian set, `None` before it was initialized.
    fn get_guardian_set(&self) -> DbResult<Option<GuardianSet>>;

    /// Adds a guardian, returning whether it was newly added.
    /// Returns [`DbError::NotBootstrapped`](crate::DbError) before initialization.
    fn add_guardian(&self, guardian: Address) -> DbResult<bool>;

    /// Removes a guardian unless it is the last member.
    fn remove_guardian(&self, guardian: Address) -> DbResult<GuardianRemoval>;
}

/// Read access to the mapping table and its local token index.
pub trait TokenMappingDatabase: Send + Sync + 'static {
    /// Gets the mapping entry, including tombstones.
    fn get_mapping(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> DbResult<Option<TokenMappingEntry>>;

    /// Gets the mapping key a local token is bound to.
    fn get_mapping_key_by_local(
        &self,
        local_token: Address,
    ) -> DbResult<Option<(TokenStandard, Address)>>;

    /// Gets every entry ordered by standard, then foreign token.
    fn get_all_mappings(&self) -> DbResult<Vec<TokenMappingEntry>>;
}

/// Database interface for the receipt ledger.
pub trait ReceiptDatabase: Send + Sync + 'static {
    /// Records the receipt if it was not consumed before for its local token.
    /// Returns `false` and writes nothing otherwise.
    fn try_consume_receipt(&self, record: ReceiptRecord) -> DbResult<bool>;

    fn get_receipt(
        &self,
        local_token: Address,
        receipt_id: &ReceiptId,
    ) -> DbResult<Option<ReceiptRecord>>;
}

/// Database interface for outstanding supply counters.
///
/// Updating an instance counter also updates the aggregate counter of its
/// local token in the same step.
pub trait SupplyDatabase: Send + Sync + 'static {
    /// Gets the counter, zero if it was never written.
    fn get_supply(&self, key: SupplyKey) -> DbResult<U256>;

    /// Increases the counter. If `instance_cap` is given, an instance counter
    /// may not end up above it.
    fn credit_supply(
        &self,
        key: SupplyKey,
        amount: U256,
        instance_cap: Option<U256>,
    ) -> DbResult<SupplyUpdate>;

    /// Decreases the counter, refusing to go below zero.
    fn debit_supply(&self, key: SupplyKey, amount: U256) -> DbResult<SupplyUpdate>;
}

/// Operations that must be atomic across several tables.
pub trait BridgeLedgerDatabase: Send + Sync + 'static {
    /// Inserts an active mapping and its local token index entry.
    ///
    /// A tombstone for the same foreign token is replaced. If it was bound
    /// to a different local token, that token's aggregate supply must be
    /// zero and its index entry is dropped.
    ///
    /// Receipts are namespaced by local token. Once a tombstone is replaced
    /// with a different local token, foreign receipts consumed under the old
    /// one are fresh again for the new one, so the event source must not
    /// re-deliver deposits that predate the replacement.
    fn put_mapping_checked(&self, entry: TokenMappingEntry) -> DbResult<MappingInsert>;

    /// Tombstones the active mapping if the aggregate supply of its local
    /// token equals `expected_outstanding`.
    fn remove_mapping_if_supply(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
        expected_outstanding: U256,
        removed_at: TimestampMs,
    ) -> DbResult<MappingRemoval>;

    /// Consumes the receipt and credits the minted amount as one unit.
    fn commit_deposit(
        &self,
        record: ReceiptRecord,
        instance_cap: Option<U256>,
    ) -> DbResult<DepositCommit>;
}
