//! Receipts of consumed foreign-chain events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, TimestampMs, U256};

/// Unique identifier of one foreign-chain deposit event, typically derived
/// from the transaction hash and log index.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Audit record written when a receipt is consumed by a mint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub receipt_id: ReceiptId,
    pub local_token: Address,
    pub instance_id: Option<U256>,
    pub amount: U256,
    pub consumed_at: TimestampMs,
}
