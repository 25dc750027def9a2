//! Collection of data types shared by the bridge core, its storage backends
//! and the operator tooling.

pub mod events;
pub mod guardian;
pub mod instructions;
pub mod mapping;
pub mod receipt;
pub mod standard;
pub mod supply;

pub use alloy_primitives::{keccak256, Address, B256, U256};

/// Unix timestamp in milliseconds.
pub type TimestampMs = u64;

pub mod prelude {
    pub use crate::{
        events::{ForeignDeposit, LocalBurn},
        guardian::GuardianSet,
        instructions::{MintInstruction, ReleaseInstruction},
        mapping::{MappingStatus, TokenMapping, TokenMappingEntry},
        receipt::{ReceiptId, ReceiptRecord},
        standard::{StandardParams, TokenMetadata, TokenStandard},
        supply::SupplyKey,
        Address, TimestampMs, U256,
    };
}
