//! Control core of a two-chain token bridge.
//!
//! [`BridgeController`] validates confirmed foreign deposits and local
//! burns against the guardian set, the token mappings, the receipt ledger
//! and the supply counters, and returns the instructions the chain-write
//! executors have to carry out.

use std::time::{SystemTime, UNIX_EPOCH};

use tokenbridge_primitives::TimestampMs;

pub mod controller;
pub mod errors;
pub mod locks;
pub mod mapping;
pub mod permissions;
pub mod receipts;
pub mod sink;
pub mod supply;
pub mod validation;

pub use controller::BridgeController;
pub use errors::{BridgeError, BridgeResult};
pub use mapping::{
    derive_local_address, Create2Deployer, Reservation, TokenDeployer, TokenMappingRegistry,
};
pub use permissions::PermissionRegistry;
pub use receipts::ReceiptLedger;
pub use sink::{BufferedSink, InstructionSink, RelayOutcome};
pub use supply::SupplyTracker;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokenbridge_db_store_sled as _;

/// Current wall clock time in milliseconds since the unix epoch.
pub(crate) fn now_millis() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or_default()
}
