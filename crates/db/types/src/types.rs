//! Outcomes of the checked database operations.
//!
//! Checked operations evaluate their precondition and apply the write in the
//! same atomic step. A failed precondition is reported through these types
//! rather than as a [`DbError`](crate::DbError), and leaves the store
//! untouched.

use tokenbridge_primitives::{standard::TokenStandard, Address, U256};

/// Result of removing a member from the guardian set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GuardianRemoval {
    Removed,
    /// The address was not a member, nothing changed.
    NotMember,
    /// The address is the only remaining member and was kept.
    LastMember,
}

/// Result of inserting a mapping.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MappingInsert {
    Inserted,
    /// An active mapping already exists for the foreign token.
    AlreadyMapped,
    /// The local token already backs the mapping of another foreign token.
    LocalTokenInUse {
        standard: TokenStandard,
        foreign_token: Address,
    },
    /// A tombstoned mapping for the foreign token still has outstanding
    /// supply under a different local token.
    OrphanedSupply {
        previous_local_token: Address,
        outstanding: U256,
    },
}

/// Result of removing a mapping guarded by its outstanding supply.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MappingRemoval {
    /// Mapping tombstoned, carries the local token that backed it.
    Removed { local_token: Address },
    /// No active mapping for the foreign token.
    NotFound,
    /// The live outstanding supply differs from the asserted one.
    SupplyMismatch { actual: U256 },
}

/// Result of a supply counter update.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SupplyUpdate {
    /// Update applied, carries the new balance of the addressed counter.
    Applied { balance: U256 },
    /// A debit exceeded the current balance.
    Insufficient { available: U256 },
    /// A credit would overflow the counter.
    Overflow,
    /// A credit would push an instance above its cap.
    CapExceeded { balance: U256 },
}

/// Result of consuming a receipt and crediting the minted supply together.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DepositCommit {
    Committed { balance: U256 },
    /// The receipt was already consumed for this local token.
    AlreadyConsumed,
    /// The receipt was fresh but the credit could not be applied. Nothing was
    /// written, not even the receipt.
    Rejected(SupplyUpdate),
}
