//! Instructions handed to the chain-write executors.

use serde::{Deserialize, Serialize};

use crate::{receipt::ReceiptId, standard::TokenStandard, Address, U256};

/// Mint the wrapped token on the local chain.
///
/// The receipt id is carried along so the executor can make its own
/// submission idempotent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MintInstruction {
    pub local_token: Address,
    pub recipient: Address,
    pub amount: U256,
    pub instance_id: Option<U256>,
    pub receipt_id: ReceiptId,
}

/// Release the original token on the foreign chain.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInstruction {
    pub standard: TokenStandard,
    pub foreign_token: Address,
    pub local_token: Address,
    pub foreign_recipient: Address,
    pub amount: U256,
    pub instance_id: Option<U256>,
    /// Nonce of the local burn this release answers.
    pub local_nonce: u64,
}
